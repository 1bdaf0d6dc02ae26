//! Document store: enumeration, identifier resolution, and the process-wide
//! decode cache.
//!
//! Decoding a PDF is the only expensive step in the pipeline, so decoded
//! text is cached for the life of the process. Concurrent callers asking for
//! the same uncached document share a single decode (one `OnceCell` per
//! document id); failed decodes leave the cell empty, so a later request
//! retries naturally.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

use soptools_core::sop::{self, CalculatorTag, Section};

/// Identifies one document without materializing its content.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DocumentRef {
    pub id: String,
    pub label: String,
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Pdf {
        path: PathBuf,
        source: pdf::PdfError,
    },
}

/// Turns a located document into a linear text stream.
///
/// The production implementation is [`PdfDecoder`]; tests substitute fakes.
pub trait TextDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<String, DecodeError>;
}

/// Production decoder backed by the pdf crate.
pub struct PdfDecoder;

impl TextDecoder for PdfDecoder {
    fn decode(&self, path: &Path) -> Result<String, DecodeError> {
        let bytes = std::fs::read(path).map_err(|source| DecodeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        pdf::extract_text(&bytes).map_err(|source| DecodeError::Pdf {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Internal error channel for resolution. Logged at the failure site and
/// collapsed to an absent result at the public boundary, so callers never
/// see format-specific detail.
#[derive(Debug, thiserror::Error)]
enum ResolveError {
    #[error("no document matches id {0:?}")]
    UnknownDocument(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("decode task failed: {0}")]
    Join(String),
}

/// Outcome of extracting the sections of one document.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionsOutcome {
    NotFound,
    NoSectionsDetected { raw_text_available: bool },
    Sections { sections: Vec<Section> },
}

/// Outcome of a point lookup for one section.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    NotFound,
    NoSuchSection,
    Found(SectionDetail),
}

/// One section plus the context a caller needs to act on it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SectionDetail {
    pub document_id: String,
    #[serde(flatten)]
    pub section: Section,
    pub calculator_tags: Vec<CalculatorTag>,
}

/// One search hit: a section plus its document of origin.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchResult {
    pub document_id: String,
    pub document_label: String,
    #[serde(flatten)]
    pub section: Section,
    pub calculator_tags: Vec<CalculatorTag>,
}

pub struct SopStore {
    dir: PathBuf,
    decoder: Arc<dyn TextDecoder>,
    cache: Mutex<HashMap<String, Arc<OnceCell<Arc<String>>>>>,
}

impl SopStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_decoder(dir, Arc::new(PdfDecoder))
    }

    pub fn with_decoder(dir: impl Into<PathBuf>, decoder: Arc<dyn TextDecoder>) -> Self {
        Self {
            dir: dir.into(),
            decoder,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// List all available documents in a stable (file name) order.
    pub fn list_documents(&self) -> Vec<DocumentRef> {
        enumerate(&self.dir)
    }

    /// Resolve a document id to its decoded text.
    ///
    /// Cached after the first successful decode; concurrent callers for the
    /// same uncached id are coalesced into one decode. Returns `None` when
    /// the id matches no document or the decode fails -- the cause is logged
    /// for operators, never surfaced.
    pub async fn resolve(&self, document_id: &str) -> Option<Arc<String>> {
        let cell = {
            let mut cache = self.cache.lock().expect("decode cache lock poisoned");
            Arc::clone(cache.entry(document_id.to_string()).or_default())
        };

        let result = cell
            .get_or_try_init(|| {
                let dir = self.dir.clone();
                let decoder = Arc::clone(&self.decoder);
                let id = document_id.to_string();
                async move {
                    let text =
                        tokio::task::spawn_blocking(move || -> Result<String, ResolveError> {
                            let doc = locate(&dir, &id)
                                .ok_or_else(|| ResolveError::UnknownDocument(id.clone()))?;
                            Ok(decoder.decode(&doc.path)?)
                        })
                        .await
                        .map_err(|err| ResolveError::Join(err.to_string()))??;
                    Ok::<_, ResolveError>(Arc::new(text))
                }
            })
            .await;

        match result {
            Ok(text) => Some(Arc::clone(text)),
            Err(err) => {
                log::warn!("cannot resolve document {document_id:?}: {err}");
                None
            }
        }
    }

    /// Raw decoded text of one document.
    pub async fn get_raw_text(&self, document_id: &str) -> Option<Arc<String>> {
        self.resolve(document_id).await
    }

    /// Extract the classified sections of one document.
    ///
    /// Sections are re-derived from the cached text on every call; only the
    /// decode is expensive enough to memoize.
    pub async fn get_sections(&self, document_id: &str) -> SectionsOutcome {
        let Some(text) = self.resolve(document_id).await else {
            return SectionsOutcome::NotFound;
        };

        let sections = sop::parse_sections(&text);
        if sections.is_empty() {
            SectionsOutcome::NoSectionsDetected {
                raw_text_available: !text.trim().is_empty(),
            }
        } else {
            SectionsOutcome::Sections { sections }
        }
    }

    /// Look up one section by its dotted number, with calculator tags.
    pub async fn get_section(&self, document_id: &str, number: &str) -> SectionOutcome {
        match self.get_sections(document_id).await {
            SectionsOutcome::NotFound => SectionOutcome::NotFound,
            SectionsOutcome::NoSectionsDetected { .. } => SectionOutcome::NoSuchSection,
            SectionsOutcome::Sections { sections } => {
                match sop::find_section(&sections, number) {
                    Some(section) => SectionOutcome::Found(SectionDetail {
                        document_id: document_id.to_string(),
                        calculator_tags: sop::map_calculators(&section.title, &section.content),
                        section: section.clone(),
                    }),
                    None => SectionOutcome::NoSuchSection,
                }
            }
        }
    }

    /// Search every document's sections for a query string.
    ///
    /// Results come back in (document enumeration order, section order);
    /// there is no ranking. Documents that fail to decode are skipped.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        let query_lower = query.to_lowercase();
        let mut results = Vec::new();

        for doc in self.list_documents() {
            let Some(text) = self.resolve(&doc.id).await else {
                continue;
            };

            for section in sop::parse_sections(&text) {
                if sop::matches_query(&section, &query_lower) {
                    results.push(SearchResult {
                        document_id: doc.id.clone(),
                        document_label: doc.label.clone(),
                        calculator_tags: sop::map_calculators(&section.title, &section.content),
                        section,
                    });
                }
            }
        }

        results
    }
}

/// Enumerate `*.pdf` files under `dir`, skipping Windows `Zone.Identifier`
/// artifacts, sorted by file name so the order is stable across runs.
fn enumerate(dir: &Path) -> Vec<DocumentRef> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("cannot enumerate documents in {}: {err}", dir.display());
            return Vec::new();
        }
    };

    let mut docs: Vec<DocumentRef> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .filter_map(|path| {
            let id = path.file_stem()?.to_str()?.to_string();
            let label = path.file_name()?.to_str()?.to_string();
            if label.contains("Zone.Identifier") {
                return None;
            }
            Some(DocumentRef { id, label, path })
        })
        .collect();

    docs.sort_by(|a, b| a.label.cmp(&b.label));
    docs
}

/// Find the document a caller-supplied id refers to: exact stem match first,
/// then the first stem with the id as a prefix, in enumeration order.
fn locate(dir: &Path, document_id: &str) -> Option<DocumentRef> {
    let docs = enumerate(dir);
    docs.iter()
        .find(|doc| doc.id == document_id)
        .cloned()
        .or_else(|| docs.into_iter().find(|doc| doc.id.starts_with(document_id)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    const SOP_FIXTURE: &str = "1. OVERVIEW\nThis assay requires 2.5 mL buffer.\n2. MATERIALS AND METHODS\nUse PCR and a vector.\n3. SAFETY\nWear gloves.";

    /// Decoder fake keyed by file stem; counts decodes, optionally fails the
    /// first call or sleeps to widen race windows.
    struct FakeDecoder {
        texts: HashMap<String, String>,
        calls: AtomicUsize,
        fail_next: AtomicBool,
        delay: Option<Duration>,
    }

    impl FakeDecoder {
        fn new(texts: &[(&str, &str)]) -> Self {
            Self {
                texts: texts
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
                fail_next: AtomicBool::new(false),
                delay: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TextDecoder for FakeDecoder {
        fn decode(&self, path: &Path) -> Result<String, DecodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(DecodeError::Pdf {
                    path: path.to_path_buf(),
                    source: pdf::PdfError::Parse("forced failure".to_string()),
                });
            }
            let stem = path.file_stem().unwrap().to_str().unwrap();
            Ok(self.texts.get(stem).cloned().unwrap_or_default())
        }
    }

    fn store_with(
        files: &[&str],
        texts: &[(&str, &str)],
    ) -> (tempfile::TempDir, Arc<FakeDecoder>, SopStore) {
        let dir = tempfile::TempDir::new().unwrap();
        for file in files {
            std::fs::write(dir.path().join(file), b"%PDF-1.4 stub").unwrap();
        }
        let decoder = Arc::new(FakeDecoder::new(texts));
        let store = SopStore::with_decoder(dir.path(), Arc::clone(&decoder) as Arc<dyn TextDecoder>);
        (dir, decoder, store)
    }

    // -- enumeration --------------------------------------------------------

    #[test]
    fn list_documents_sorted_and_filtered() {
        let (_dir, _decoder, store) = store_with(
            &[
                "zeta_protocol.pdf",
                "alpha_protocol.pdf",
                "notes.txt",
                "alpha_protocol.pdf:Zone.Identifier.pdf",
            ],
            &[],
        );

        let docs = store.list_documents();
        let labels: Vec<&str> = docs.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["alpha_protocol.pdf", "zeta_protocol.pdf"]);
        assert_eq!(docs[0].id, "alpha_protocol");
    }

    #[test]
    fn list_documents_missing_dir_is_empty() {
        let store = SopStore::new("/definitely/not/a/real/dir");
        assert!(store.list_documents().is_empty());
    }

    // -- resolution and caching ---------------------------------------------

    #[tokio::test]
    async fn resolve_caches_decoded_text() {
        let (_dir, decoder, store) =
            store_with(&["cloning.pdf"], &[("cloning", SOP_FIXTURE)]);

        let first = store.resolve("cloning").await.unwrap();
        let second = store.resolve("cloning").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(decoder.calls(), 1);
    }

    #[tokio::test]
    async fn resolve_by_prefix() {
        let (_dir, _decoder, store) = store_with(
            &["cloning_v2.pdf", "digestion.pdf"],
            &[("cloning_v2", SOP_FIXTURE)],
        );

        let text = store.resolve("cloning").await.unwrap();
        assert!(text.contains("OVERVIEW"));
    }

    #[tokio::test]
    async fn resolve_prefers_exact_match_over_prefix() {
        let (_dir, _decoder, store) = store_with(
            &["pcr.pdf", "pcr_extended.pdf"],
            &[("pcr", "exact"), ("pcr_extended", "prefixed")],
        );

        let text = store.resolve("pcr").await.unwrap();
        assert_eq!(text.as_str(), "exact");
    }

    #[tokio::test]
    async fn resolve_unknown_document_is_none() {
        let (_dir, decoder, store) = store_with(&["cloning.pdf"], &[]);
        assert!(store.resolve("missing").await.is_none());
        assert_eq!(decoder.calls(), 0);
    }

    #[tokio::test]
    async fn resolve_failure_is_not_memoized() {
        let (_dir, decoder, store) =
            store_with(&["cloning.pdf"], &[("cloning", SOP_FIXTURE)]);
        decoder.fail_next.store(true, Ordering::SeqCst);

        assert!(store.resolve("cloning").await.is_none());
        // The failed decode left the cell empty; this one retries and works.
        assert!(store.resolve("cloning").await.is_some());
        assert_eq!(decoder.calls(), 2);
    }

    #[tokio::test]
    async fn concurrent_resolves_share_one_decode() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("cloning.pdf"), b"%PDF-1.4 stub").unwrap();
        let decoder = Arc::new(FakeDecoder {
            texts: HashMap::from([("cloning".to_string(), SOP_FIXTURE.to_string())]),
            calls: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
            delay: Some(Duration::from_millis(50)),
        });
        let store = Arc::new(SopStore::with_decoder(
            dir.path(),
            Arc::clone(&decoder) as Arc<dyn TextDecoder>,
        ));

        let (a, b) = tokio::join!(store.resolve("cloning"), store.resolve("cloning"));

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(decoder.calls(), 1);
    }

    // -- sections -----------------------------------------------------------

    #[tokio::test]
    async fn get_sections_not_found() {
        let (_dir, _decoder, store) = store_with(&[], &[]);
        assert!(matches!(
            store.get_sections("missing").await,
            SectionsOutcome::NotFound
        ));
    }

    #[tokio::test]
    async fn get_sections_none_detected_with_raw_text() {
        let (_dir, _decoder, store) = store_with(
            &["freeform.pdf"],
            &[("freeform", "Wash hands.\nLabel tubes clearly.")],
        );
        assert!(matches!(
            store.get_sections("freeform").await,
            SectionsOutcome::NoSectionsDetected {
                raw_text_available: true
            }
        ));
    }

    #[tokio::test]
    async fn get_sections_none_detected_without_raw_text() {
        let (_dir, _decoder, store) = store_with(&["blank.pdf"], &[("blank", "")]);
        assert!(matches!(
            store.get_sections("blank").await,
            SectionsOutcome::NoSectionsDetected {
                raw_text_available: false
            }
        ));
    }

    #[tokio::test]
    async fn get_sections_extracts_fixture() {
        let (_dir, _decoder, store) =
            store_with(&["cloning.pdf"], &[("cloning", SOP_FIXTURE)]);

        let SectionsOutcome::Sections { sections } = store.get_sections("cloning").await else {
            panic!("expected sections");
        };
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].title, "MATERIALS AND METHODS");
    }

    // -- section lookup -----------------------------------------------------

    #[tokio::test]
    async fn get_section_with_calculator_tags() {
        let (_dir, _decoder, store) =
            store_with(&["cloning.pdf"], &[("cloning", SOP_FIXTURE)]);

        let SectionOutcome::Found(detail) = store.get_section("cloning", "2").await else {
            panic!("expected section");
        };
        assert_eq!(detail.section.content, "Use PCR and a vector.");
        assert_eq!(detail.document_id, "cloning");
        assert!(detail.calculator_tags.contains(&CalculatorTag::Pcr));
        assert!(detail.calculator_tags.contains(&CalculatorTag::Ligation));
    }

    #[tokio::test]
    async fn get_section_missing_number() {
        let (_dir, _decoder, store) =
            store_with(&["cloning.pdf"], &[("cloning", SOP_FIXTURE)]);
        assert!(matches!(
            store.get_section("cloning", "9").await,
            SectionOutcome::NoSuchSection
        ));
    }

    #[tokio::test]
    async fn get_section_missing_document() {
        let (_dir, _decoder, store) = store_with(&[], &[]);
        assert!(matches!(
            store.get_section("missing", "1").await,
            SectionOutcome::NotFound
        ));
    }

    // -- search -------------------------------------------------------------

    #[tokio::test]
    async fn search_across_documents_in_stable_order() {
        let (_dir, _decoder, store) = store_with(
            &["b_protocol.pdf", "a_protocol.pdf"],
            &[
                ("a_protocol", "1. PCR AMPLIFICATION\nRun the thermocycler."),
                ("b_protocol", SOP_FIXTURE),
            ],
        );

        let results = store.search("PCR").await;
        let docs: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(docs, vec!["a_protocol", "b_protocol"]);
        assert_eq!(results[1].section.number, "2");
        assert!(results[1].calculator_tags.contains(&CalculatorTag::Pcr));
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let (_dir, _decoder, store) =
            store_with(&["cloning.pdf"], &[("cloning", SOP_FIXTURE)]);
        assert_eq!(store.search("pcr").await.len(), 1);
        assert_eq!(store.search("GLOVES").await.len(), 1);
    }

    #[tokio::test]
    async fn search_no_matches_is_empty_not_error() {
        let (_dir, _decoder, store) =
            store_with(&["cloning.pdf"], &[("cloning", SOP_FIXTURE)]);
        assert!(store.search("centrifuge").await.is_empty());
    }

    #[tokio::test]
    async fn search_skips_undecodable_documents() {
        let (_dir, decoder, store) = store_with(
            &["bad.pdf", "cloning.pdf"],
            &[("cloning", SOP_FIXTURE)],
        );
        decoder.fail_next.store(true, Ordering::SeqCst);

        // "bad" decodes to an empty string only after the forced failure is
        // consumed; the first enumerated document fails, the second matches.
        let results = store.search("gloves").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document_id, "cloning");
    }
}
