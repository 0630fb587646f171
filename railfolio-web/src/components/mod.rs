pub mod banner;
pub mod controls_hint;
pub mod detail;
pub mod hud;
pub mod intro;
pub mod ticket;
pub mod toolbar;
pub mod track;
