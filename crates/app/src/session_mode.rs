//! Headless session loop: reads JSON commands line by line and writes one
//! JSON response per command.
//!
//! Each input line is a JSON object with a `"cmd"` discriminator. Each output
//! line carries `"protocol_version"` and `"type"`. See
//! [`estimator::session::protocol`] for the full schema.

use std::io::{BufRead, Write};

use bevy::prelude::*;

use estimator::aggregate::ImpactLog;
use estimator::air_quality::assess_air_quality;
use estimator::electricity::{ElectricityHistory, YearMonth};
use estimator::routes::{LatestRoutes, RouteRequest};
use estimator::session::protocol::{error_response, notices_since};
use estimator::session::{
    make_response, NoticeLevel, NoticeLog, ResponsePayload, SessionClock, SessionCommand,
    SessionReport, SessionResponse, SubmitElectricityReading, SubmitImpact, PROTOCOL_VERSION,
};

/// Cap on `step` so a typo cannot spin forever.
const MAX_STEP_TICKS: u32 = 10_000;
/// Updates spent waiting for a distance lookup before giving up.
const MAX_ROUTE_TICKS: u32 = 1_000;

/// Drive `app` from `input` until it ends or a `quit` command arrives.
pub fn run_session(app: &mut App, input: impl BufRead, mut output: impl Write) {
    write_response(&mut output, &make_response(ResponsePayload::Ready));
    info!("green-heartbeat session v{PROTOCOL_VERSION} ready, waiting for commands");

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("input read error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let cmd: SessionCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                write_response(&mut output, &error_response(format!("Parse error: {e}"), vec![]));
                continue;
            }
        };

        let response = process_command(cmd, app);
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        write_response(&mut output, &response);
        if is_goodbye {
            break;
        }
    }

    info!("green-heartbeat session shutting down");
}

fn write_response(output: &mut impl Write, response: &SessionResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            if let Err(e) = writeln!(output, "{json}").and_then(|()| output.flush()) {
                error!("failed to write response: {e}");
            }
        }
        Err(e) => error!("failed to serialize response: {e}"),
    }
}

fn notices_seen(app: &App) -> usize {
    app.world().resource::<NoticeLog>().received()
}

/// The newest error among notices posted since `seen`, if any.
fn new_error(app: &App, seen: usize) -> Option<String> {
    notices_since(app.world(), seen)
        .into_iter()
        .rev()
        .find(|n| n.level == NoticeLevel::Error)
        .map(|n| n.text)
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

pub fn process_command(cmd: SessionCommand, app: &mut App) -> SessionResponse {
    let seen = notices_seen(app);

    match cmd {
        SessionCommand::Submit {
            category,
            quantity,
            label,
            at,
        } => {
            let mut submission = match SubmitImpact::parse(&category, quantity) {
                Ok(s) => s,
                Err(e) => return error_response(e.to_string(), vec![]),
            };
            submission.label = label;
            submission.at = at;

            let before = app.world().resource::<ImpactLog>().len();
            app.world_mut().send_event(submission);
            app.update();

            let notices = notices_since(app.world(), seen);
            let log = app.world().resource::<ImpactLog>();
            match log.last().filter(|_| log.len() > before) {
                Some(entry) => make_response(ResponsePayload::Recorded {
                    entry: entry.clone(),
                    notices,
                }),
                None => error_response(
                    new_error(app, seen).unwrap_or_else(|| "Submission rejected".to_string()),
                    notices,
                ),
            }
        }

        SessionCommand::Electricity { month, units } => {
            let month =
                month.unwrap_or_else(|| YearMonth::of(app.world().resource::<SessionClock>().now()));
            app.world_mut().send_event(SubmitElectricityReading {
                month: Some(month),
                units,
            });
            app.update();

            let notices = notices_since(app.world(), seen);
            if let Some(message) = new_error(app, seen) {
                return error_response(message, notices);
            }
            match app.world().resource::<ElectricityHistory>().get(month) {
                Some(usage) => make_response(ResponsePayload::ElectricityRecorded {
                    usage: *usage,
                    notices,
                }),
                None => error_response(format!("No reading stored for {month}"), notices),
            }
        }

        SessionCommand::Route {
            origin,
            destination,
            modes,
        } => {
            let request = RouteRequest::new(origin, destination);
            let request = match modes {
                Some(modes) => request.with_modes(&modes),
                None => request,
            };
            app.world_mut().send_event(request);
            app.update();
            for _ in 0..MAX_ROUTE_TICKS {
                if app.world().resource::<LatestRoutes>().in_flight == 0 {
                    break;
                }
                std::thread::yield_now();
                app.update();
            }

            let notices = notices_since(app.world(), seen);
            if let Some(message) = new_error(app, seen) {
                return error_response(message, notices);
            }
            let latest = app.world().resource::<LatestRoutes>();
            match (&latest.comparison, latest.in_flight) {
                (Some(comparison), 0) => make_response(ResponsePayload::Routes {
                    origin: latest.origin.clone(),
                    destination: latest.destination.clone(),
                    comparison: comparison.clone(),
                    notices,
                }),
                _ => error_response("Route lookup did not finish", notices),
            }
        }

        SessionCommand::Summary => match SessionReport::collect(app.world()) {
            Ok(report) => make_response(ResponsePayload::Summary {
                report: Box::new(report),
            }),
            Err(e) => error_response(e.to_string(), vec![]),
        },

        SessionCommand::AirQuality { aqi } => match assess_air_quality(aqi) {
            Ok(report) => make_response(ResponsePayload::AirQuality { report }),
            Err(e) => error_response(e.to_string(), vec![]),
        },

        SessionCommand::SetTime { at } => {
            app.world_mut().resource_mut::<SessionClock>().pin(at);
            app.update();
            make_response(ResponsePayload::Ok)
        }

        SessionCommand::Step { ticks } => {
            let n = ticks.min(MAX_STEP_TICKS);
            for _ in 0..n {
                app.update();
            }
            make_response(ResponsePayload::StepComplete {
                ticks: n,
                notices: notices_since(app.world(), seen),
            })
        }

        SessionCommand::Quit => make_response(ResponsePayload::Goodbye),
    }
}
