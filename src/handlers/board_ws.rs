use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;

use crate::feed::{FeedHandle, FeedState};

/// JSON pushed to the browser whenever the feed state changes.
pub fn board_update_message(state: &FeedState) -> String {
    serde_json::json!({
        "type": "board_update",
        "status": state.status.as_str(),
        "message": state.status.message(),
        "received_at": state
            .live_snapshot()
            .map(|s| s.received_at.to_rfc3339()),
    })
    .to_string()
}

/// WebSocket upgrade handler.
///
/// Each connection watches the feed until the browser goes away or the feed
/// ends; the browser re-fetches the grid when told about an update.
pub async fn ws_connect(
    req: HttpRequest,
    body: web::Payload,
    feed: web::Data<FeedHandle>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, body)?;
    let mut updates = feed.subscribe();

    actix_web::rt::spawn(async move {
        let initial = board_update_message(&updates.borrow());
        if ws_session.text(initial).await.is_err() {
            return;
        }

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let msg = board_update_message(&updates.borrow_and_update());
                    if ws_session.text(msg).await.is_err() {
                        break;
                    }
                }
                Some(Ok(msg)) = msg_stream.recv() => {
                    match msg {
                        Message::Ping(bytes) => {
                            if ws_session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Message::Close(_) => break,
                        _ => {}
                    }
                }
                else => break,
            }
        }

        let _ = ws_session.close(None).await;
        log::debug!("Board WebSocket closed");
    });

    Ok(response)
}
