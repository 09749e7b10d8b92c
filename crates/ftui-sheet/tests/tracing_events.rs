//! Structured log events emitted by the sheet (requires `--features tracing`).

#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};

use ftui_sheet::{BottomSheet, SheetConfig, SheetGesture, Status};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Default)]
struct Captured {
    messages: Vec<String>,
    spans: Vec<String>,
}

struct SheetTraceCapture {
    state: Arc<Mutex<Captured>>,
}

impl<S> Layer<S> for SheetTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        self.state
            .lock()
            .expect("sheet trace lock")
            .spans
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(message) = msg.message {
            self.state
                .lock()
                .expect("sheet trace lock")
                .messages
                .push(message);
        }
    }
}

#[test]
fn transitions_and_snap_backs_are_logged() {
    let state = Arc::new(Mutex::new(Captured::default()));
    let subscriber = tracing_subscriber::registry().with(SheetTraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut sheet = BottomSheet::new(
        SheetConfig::default()
            .with_height(800.0)
            .with_status(Status::Closed),
    )
    .unwrap();
    sheet.handle_gesture(SheetGesture::Drag { translation: 30.0 });
    sheet.handle_gesture(SheetGesture::Release { velocity: 20.0 });
    sheet.handle_gesture(SheetGesture::Release { velocity: -400.0 });
    let handle = sheet.subscribe(|_| {}).unwrap();
    sheet.unsubscribe(handle).unwrap();

    let captured = state.lock().expect("sheet trace lock");
    for expected in [
        "sheet.mount",
        "sheet.snap_back",
        "sheet.transition",
        "sheet.listener",
    ] {
        assert!(
            captured.messages.iter().any(|m| m == expected),
            "missing {expected}: {:?}",
            captured.messages
        );
    }
    assert!(captured.spans.iter().any(|s| s == "sheet.gesture"));
}
