use super::{Request, Ticket};
use crate::api::{ApiError, Payload, PhotoSource};
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, trace};

/// Result of one request, sent from a fetch task back to the UI loop.
#[derive(Debug)]
pub struct FetchMessage {
    pub ticket: Ticket,
    pub result: Result<Payload, ApiError>,
}

/// Runs requests concurrently on the tokio runtime and reports each result
/// over a channel. No deduplication and no cancellation: every dispatched
/// request produces exactly one message.
pub struct Dispatcher<S> {
    source: Arc<S>,
    tx: UnboundedSender<FetchMessage>,
}

impl<S: PhotoSource> Dispatcher<S> {
    /// Create a dispatcher and the receiving end the UI loop drains.
    pub fn new(source: S) -> (Self, UnboundedReceiver<FetchMessage>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                source: Arc::new(source),
                tx,
            },
            rx,
        )
    }

    /// Spawn a task for the request. Must be called from inside a runtime.
    pub fn dispatch(&self, request: Request) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let Request { ticket, query } = request;
        trace!(?ticket, ?query, "Dispatching");

        tokio::spawn(async move {
            let result = source.execute(query).await;
            if tx.send(FetchMessage { ticket, result }).is_err() {
                debug!(?ticket, "Receiver gone, dropping response");
            }
        });
    }

    pub fn dispatch_all(&self, requests: impl IntoIterator<Item = Request>) {
        for request in requests {
            self.dispatch(request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Query;
    use crate::fetch::{MountId, Slot};
    use crate::model::{Order, fixtures};
    use std::future::Future;
    use std::time::Duration;

    struct FakeSource;

    impl PhotoSource for FakeSource {
        fn execute(&self, query: Query) -> impl Future<Output = Result<Payload, ApiError>> + Send {
            async move {
                match query {
                    Query::Photo { id } if id == "missing" => Err(ApiError::NotFound(id)),
                    Query::Photo { id } if id == "slow" => {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(Payload::Photo(Box::new(fixtures::photo(&id))))
                    }
                    Query::Photo { id } => Ok(Payload::Photo(Box::new(fixtures::photo(&id)))),
                    Query::DownloadUrl { photo_id } => Ok(Payload::DownloadUrl(format!(
                        "https://images.unsplash.com/{photo_id}"
                    ))),
                    Query::ListPhotos { per_page, .. } => {
                        let ids: Vec<String> = (0..per_page).map(|i| format!("p{i}")).collect();
                        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
                        Ok(Payload::Photos(fixtures::photos(&refs)))
                    }
                    _ => Ok(Payload::Photos(Vec::new())),
                }
            }
        }
    }

    fn request(slot: Slot, generation: u64, query: Query) -> Request {
        Request::new(MountId(1), slot, generation, query)
    }

    #[tokio::test]
    async fn test_dispatcher_delivers_every_result() {
        let (dispatcher, mut rx) = Dispatcher::new(FakeSource);
        dispatcher.dispatch_all(vec![
            request(
                Slot::Trending,
                1,
                Query::ListPhotos {
                    order: Order::Latest,
                    per_page: 3,
                },
            ),
            request(Slot::Photo, 1, Query::Photo { id: "missing".into() }),
        ]);

        let mut seen = Vec::new();
        for _ in 0..2 {
            seen.push(rx.recv().await.unwrap());
        }
        seen.sort_by_key(|m| m.ticket.slot == Slot::Photo);

        assert_eq!(seen[0].ticket.slot, Slot::Trending);
        assert_eq!(seen[0].result.as_ref().unwrap().clone().into_photos().unwrap().len(), 3);
        assert!(matches!(seen[1].result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_dispatcher_does_not_serialize_requests() {
        let (dispatcher, mut rx) = Dispatcher::new(FakeSource);
        dispatcher.dispatch(request(Slot::Photo, 1, Query::Photo { id: "slow".into() }));
        dispatcher.dispatch(request(Slot::Related, 1, Query::Photo { id: "fast".into() }));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.ticket.slot, Slot::Related);
        let second = rx.recv().await.unwrap();
        assert_eq!(second.ticket.slot, Slot::Photo);
    }

    #[tokio::test]
    async fn test_download_resolution_is_repeatable() {
        let (dispatcher, mut rx) = Dispatcher::new(FakeSource);
        for generation in 1..=2 {
            dispatcher.dispatch(request(
                Slot::Download,
                generation,
                Query::DownloadUrl {
                    photo_id: "abc".into(),
                },
            ));
        }

        for _ in 0..2 {
            let message = rx.recv().await.unwrap();
            let url = message.result.unwrap().into_download_url().unwrap();
            assert_eq!(url, "https://images.unsplash.com/abc");
        }
    }
}
