use crate::SectionExtractor;
use crate::error::TreeError;
use crate::results::PageData;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// The only action the responder answers
pub const GET_PAGE_DATA: &str = "getPageData";

/// Host page the responder captures on every request
pub trait PageSource: Send + Sync + 'static {
    /// URL of the page
    fn url(&self) -> String;

    /// Current markup of the page
    fn html(&self) -> Result<String, TreeError>;
}

/// Page held in memory
#[derive(Debug, Clone)]
pub struct StaticPage {
    pub url: String,
    pub html: String,
}

impl StaticPage {
    pub fn new(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            html: html.to_string(),
        }
    }
}

impl PageSource for StaticPage {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn html(&self) -> Result<String, TreeError> {
        Ok(self.html.clone())
    }
}

/// Message sent to the responder
#[derive(Debug)]
pub struct Request {
    pub action: String,
    pub respond_to: oneshot::Sender<PageData>,
}

impl Request {
    /// Builds a `getPageData` request and the receiver for its answer
    pub fn get_page_data() -> (Self, oneshot::Receiver<PageData>) {
        let (respond_to, rx) = oneshot::channel();
        let request = Self {
            action: GET_PAGE_DATA.to_string(),
            respond_to,
        };
        (request, rx)
    }
}

/// Spawns a task answering page data requests for `source`
///
/// Each request captures a fresh snapshot and runs the extraction to
/// completion before replying. The task ends once every sender is dropped.
pub fn spawn<S: PageSource>(
    source: S,
    extractor: SectionExtractor,
) -> (mpsc::Sender<Request>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<Request>(16);

    let handle = tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            if request.action != GET_PAGE_DATA {
                ::log::debug!("Ignoring unsupported action '{}'", request.action);
                continue;
            }

            let page = answer(&source, &extractor);
            if request.respond_to.send(page).is_err() {
                ::log::warn!("Requester went away before page data was delivered");
            }
        }
        ::log::debug!("Responder channel closed");
    });

    (tx, handle)
}

/// Captures the page and extracts its data
pub fn answer<S: PageSource + ?Sized>(source: &S, extractor: &SectionExtractor) -> PageData {
    let url = source.url();
    match source.html() {
        Ok(html) => extractor.extract_html(&url, &html),
        Err(e) => {
            ::log::error!("Could not capture {}: {}", url, e);
            PageData::minimal(url, String::new(), extractor.config().extension_version.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NoopSink;
    use std::sync::Arc;

    struct BrokenPage;

    impl PageSource for BrokenPage {
        fn url(&self) -> String {
            "https://shop.example/broken".to_string()
        }

        fn html(&self) -> Result<String, TreeError> {
            Err(TreeError::Snapshot("document detached".to_string()))
        }
    }

    fn extractor() -> SectionExtractor {
        SectionExtractor::new().with_sink(Arc::new(NoopSink))
    }

    #[tokio::test]
    async fn test_answers_get_page_data() {
        let page = StaticPage::new(
            "https://shop.example/p",
            "<html><body><img src=\"https://cdn.example/a.jpg\"></body></html>",
        );
        let (tx, handle) = spawn(page, extractor());

        let (request, rx) = Request::get_page_data();
        tx.send(request).await.unwrap();
        let data = rx.await.unwrap();
        assert_eq!(data.url, "https://shop.example/p");
        assert_eq!(data.images, vec!["https://cdn.example/a.jpg".to_string()]);
        assert_eq!(data.structured_content.len(), 7);

        drop(tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_ignores_other_actions() {
        let (tx, handle) = spawn(StaticPage::new("about:blank", ""), extractor());

        let (respond_to, rx) = oneshot::channel();
        tx.send(Request {
            action: "ping".to_string(),
            respond_to,
        })
        .await
        .unwrap();
        assert!(rx.await.is_err());

        drop(tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_capture_yields_minimal_record() {
        let (tx, handle) = spawn(BrokenPage, extractor());

        let (request, rx) = Request::get_page_data();
        tx.send(request).await.unwrap();
        let data = rx.await.unwrap();
        assert_eq!(data.url, "https://shop.example/broken");
        assert!(data.dom_snapshot.is_empty());
        assert!(data.images.is_empty());
        assert!(data.structured_content.is_empty());
        assert_eq!(data.extension_version, "1.3");

        drop(tx);
        handle.await.unwrap();
    }
}
