//! Station detail content lookup.
//!
//! Some stations carry extra material in their detail view (client reviews, a
//! technical deep dive, the full skill matrix). The arrival machinery never
//! inspects any of this: hosts resolve a station id through [`DetailCatalog`]
//! and render whatever descriptor comes back.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a set of reviews was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    Fiverr,
    LinkedIn,
}

/// Extra content rendered inside a station's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailContent {
    /// Only the station's own summary, highlights and description.
    Summary,
    Reviews { source: ReviewSource },
    /// Full skill matrix from the station data file.
    TechStack,
    DeepDive {
        heading_key: &'static str,
        stack: Vec<(&'static str, Vec<&'static str>)>,
    },
}

/// Lookup table keyed by station id.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailCatalog {
    entries: HashMap<&'static str, DetailContent>,
    fallback: DetailContent,
}

impl DetailCatalog {
    /// The detail content shipped with the site.
    #[must_use]
    pub fn default_catalog() -> Self {
        let entries = HashMap::from([
            (
                "freelance",
                DetailContent::Reviews {
                    source: ReviewSource::Fiverr,
                },
            ),
            (
                "nova",
                DetailContent::Reviews {
                    source: ReviewSource::LinkedIn,
                },
            ),
            ("berlin", DetailContent::TechStack),
            (
                "softoo",
                DetailContent::DeepDive {
                    heading_key: "detail.softoo.ai_compliance",
                    stack: vec![
                        ("AI", vec!["RAG", "LangChain", "OpenAI", "Vector DB"]),
                        ("Cloud", vec!["Lambda", "S3", "Step Functions"]),
                    ],
                },
            ),
            (
                "cottbus",
                DetailContent::DeepDive {
                    heading_key: "detail.cottbus.research",
                    stack: vec![
                        (
                            "Research",
                            vec!["Transformers", "CNNs", "RNNs", "Pytorch", "TensorFlow"],
                        ),
                        ("Tools", vec!["Jupyter", "HuggingFace"]),
                    ],
                },
            ),
            (
                "education_taxila",
                DetailContent::DeepDive {
                    heading_key: "detail.taxila.capstone",
                    stack: vec![("Stack", vec!["Python", "OpenCV", "YOLOv5", "Flutter"])],
                },
            ),
            (
                "logicator",
                DetailContent::DeepDive {
                    heading_key: "detail.logicator.contribution",
                    stack: vec![
                        ("Backend", vec!["Node.js", "Express", "PostgreSQL"]),
                        ("Logic", vec!["Coupon Engine", "Inventory Sync"]),
                    ],
                },
            ),
            (
                "germany_move",
                DetailContent::DeepDive {
                    heading_key: "detail.germany.preparation",
                    stack: Vec::new(),
                },
            ),
        ]);
        Self {
            entries,
            fallback: DetailContent::Summary,
        }
    }

    /// Resolve the content descriptor for a station id.
    #[must_use]
    pub fn content_for(&self, station_id: &str) -> &DetailContent {
        self.entries.get(station_id).unwrap_or(&self.fallback)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DetailCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}
