//! Capture source provider.
//!
//! Enumerates the displays available for screen capture and hands the UI an
//! opaque id for the first one; the UI opens the actual media stream through
//! the webview's media APIs. Ids are single-use per capture session and never
//! cached here; callers re-enumerate for each new attempt.

use serde::Serialize;
use tracing::{debug, warn};

use crate::Error;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSource {
    /// Opaque source id, or `None` when capture is unavailable. Callers treat
    /// `None` as a non-fatal signal and must not retry automatically.
    pub id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
}

/// Seam over the host capture API so the selection logic is testable without
/// a display server.
pub trait SourceEnumerator: Send + Sync {
    fn enumerate(&self) -> Result<Vec<SourceInfo>, Error>;
}

/// Production enumerator backed by xcap's monitor list.
pub struct DisplayEnumerator;

impl SourceEnumerator for DisplayEnumerator {
    fn enumerate(&self) -> Result<Vec<SourceInfo>, Error> {
        let monitors =
            xcap::Monitor::all().map_err(|e| Error::CaptureEnumeration(e.to_string()))?;
        Ok(monitors
            .iter()
            .enumerate()
            .map(|(idx, monitor)| SourceInfo {
                id: monitor
                    .id()
                    .map(|id| format!("screen:{id}"))
                    .unwrap_or_else(|_| format!("screen:{idx}")),
                name: monitor
                    .name()
                    .unwrap_or_else(|_| format!("Display {idx}")),
            })
            .collect())
    }
}

/// First enumerated source. Enumeration failures and empty lists both come
/// back as `id: None`; capture being unavailable is a result value here,
/// never an error.
pub fn first_source(enumerator: &dyn SourceEnumerator) -> CaptureSource {
    match enumerator.enumerate() {
        Ok(sources) => match sources.first() {
            Some(source) => {
                debug!("capture source selected: {} ({})", source.id, source.name);
                CaptureSource {
                    id: Some(source.id.clone()),
                }
            }
            None => {
                warn!("no capture sources available");
                CaptureSource { id: None }
            }
        },
        Err(e) => {
            warn!("capture source enumeration failed: {e}");
            CaptureSource { id: None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeEnumerator(Result<Vec<SourceInfo>, Error>);

    impl SourceEnumerator for FakeEnumerator {
        fn enumerate(&self) -> Result<Vec<SourceInfo>, Error> {
            match &self.0 {
                Ok(sources) => Ok(sources.clone()),
                Err(_) => Err(Error::CaptureEnumeration("backend gone".to_string())),
            }
        }
    }

    fn source(id: &str) -> SourceInfo {
        SourceInfo {
            id: id.to_string(),
            name: format!("Display {id}"),
        }
    }

    #[test]
    fn empty_list_yields_no_id() {
        let result = first_source(&FakeEnumerator(Ok(vec![])));
        assert_eq!(result.id, None);
    }

    #[test]
    fn enumeration_failure_yields_no_id() {
        let result = first_source(&FakeEnumerator(Err(Error::CaptureEnumeration(
            String::new(),
        ))));
        assert_eq!(result.id, None);
    }

    #[test]
    fn first_of_many_sources_is_selected() {
        let result = first_source(&FakeEnumerator(Ok(vec![
            source("screen:0"),
            source("screen:1"),
        ])));
        assert_eq!(result.id.as_deref(), Some("screen:0"));
    }
}
