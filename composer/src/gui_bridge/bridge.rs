use crate::workflow::runner::Runner;
use hapticore::device::{DeviceSession, LoopbackDevice};
use hapticore::record::deserialize;
use hapticore::PatternError;
use log::{info, warn};
use serde::Serialize;
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{Json, WithStatus};
use warp::Filter;

const MAX_RECORD_BYTES: u64 = 64 * 1024;

type SharedSession = Arc<Mutex<DeviceSession<LoopbackDevice>>>;
type BridgeReply = WithStatus<Json>;

/// Local HTTP front end over the runner and a device session.
pub struct GuiBridge {
    runner: Arc<Runner>,
    session: SharedSession,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>, session: DeviceSession<LoopbackDevice>) -> Self {
        Self {
            runner,
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (BridgeReply,), Error = warp::Rejection> + Clone + Send + Sync + 'static
    {
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());
        let session = self.session.clone();
        let session_filter = warp::any().map(move || session.clone());

        let list_route = warp::path!("patterns")
            .and(warp::get())
            .and(runner_filter.clone())
            .and_then(list_patterns);

        let view_route = warp::path!("patterns" / String)
            .and(warp::get())
            .and(runner_filter.clone())
            .and_then(view_pattern);

        let save_route = warp::path!("patterns")
            .and(warp::post())
            .and(warp::body::content_length_limit(MAX_RECORD_BYTES))
            .and(warp::body::bytes())
            .and(runner_filter.clone())
            .and_then(save_pattern);

        let send_route = warp::path!("send" / String)
            .and(warp::post())
            .and(runner_filter)
            .and(session_filter.clone())
            .and_then(send_pattern);

        let stop_route = warp::path!("stop")
            .and(warp::post())
            .and(session_filter)
            .and_then(stop_playback);

        list_route
            .or(view_route)
            .unify()
            .or(save_route)
            .unify()
            .or(send_route)
            .unify()
            .or(stop_route)
            .unify()
    }

    /// Connects the bridge's device, then serves until the process exits.
    pub async fn serve(&self, addr: SocketAddr) -> anyhow::Result<()> {
        {
            let mut session = self.session.lock().await;
            let timeout = self.runner.config().connect_timeout();
            info!("[GUI] device: {:?}", session.connect(timeout).await);
        }
        info!("[GUI] bridge listening on http://{}", addr);
        warp::serve(self.routes()).run(addr).await;
        Ok(())
    }
}

fn ok_reply<T: Serialize>(body: &T) -> BridgeReply {
    warp::reply::with_status(warp::reply::json(body), StatusCode::OK)
}

fn error_reply(err: &anyhow::Error) -> BridgeReply {
    let status = match err.downcast_ref::<PatternError>() {
        Some(PatternError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(PatternError::InvalidParameter { .. })
        | Some(PatternError::MalformedRecord(_))
        | Some(PatternError::EmptyInput(_))
        | Some(PatternError::EmptySelection) => StatusCode::BAD_REQUEST,
        Some(PatternError::NotConnected) | Some(PatternError::Device(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!("[GUI] request failed ({}): {:#}", status, err);
    warp::reply::with_status(
        warp::reply::json(&json!({"status": "error", "message": format!("{:#}", err)})),
        status,
    )
}

/// Path segments arrive percent-encoded; record names are stored decoded.
fn decode_name(segment: &str) -> anyhow::Result<String> {
    urlencoding::decode(segment)
        .map(|name| name.into_owned())
        .map_err(|_| {
            PatternError::InvalidParameter {
                field: "name",
                value: segment.to_string(),
                domain: "a UTF-8 percent-encoded name",
            }
            .into()
        })
}

async fn list_patterns(runner: Arc<Runner>) -> Result<BridgeReply, Infallible> {
    Ok(match runner.list() {
        Ok(names) => ok_reply(&names),
        Err(err) => error_reply(&err),
    })
}

async fn view_pattern(segment: String, runner: Arc<Runner>) -> Result<BridgeReply, Infallible> {
    Ok(match decode_name(&segment).and_then(|name| runner.view(&name)) {
        Ok(view) => ok_reply(&view),
        Err(err) => error_reply(&err),
    })
}

async fn save_pattern(body: Bytes, runner: Arc<Runner>) -> Result<BridgeReply, Infallible> {
    let saved = deserialize(&body)
        .map_err(anyhow::Error::from)
        .and_then(|record| runner.save(&record));
    Ok(match saved {
        Ok(path) => ok_reply(&json!({"status": "ok", "path": path.display().to_string()})),
        Err(err) => error_reply(&err),
    })
}

async fn send_pattern(
    segment: String,
    runner: Arc<Runner>,
    session: SharedSession,
) -> Result<BridgeReply, Infallible> {
    let name = match decode_name(&segment) {
        Ok(name) => name,
        Err(err) => return Ok(error_reply(&err)),
    };
    let sent = match runner.compose(&name) {
        Ok(pattern) => {
            let mut session = session.lock().await;
            session
                .send(&pattern)
                .map(|()| pattern.len())
                .map_err(anyhow::Error::from)
        }
        Err(err) => Err(err),
    };
    Ok(match sent {
        Ok(pulses) => {
            info!("[GUI] sent {} ({} pulses)", name, pulses);
            ok_reply(&json!({"status": "ok", "pulses": pulses}))
        }
        Err(err) => error_reply(&err),
    })
}

async fn stop_playback(session: SharedSession) -> Result<BridgeReply, Infallible> {
    session.lock().await.stop();
    Ok(ok_reply(&json!({"status": "ok"})))
}
