// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace streams emitted by controllers, read back through the recorder.

use std::cell::RefCell;
use std::rc::Rc;

use unveil_core::backend::{IntersectionRecord, NoLookup, ObserveError};
use unveil_core::config::Config;
use unveil_core::controller::{DisclosureController, DisclosureState};
use unveil_core::id::InstanceId;
use unveil_core::options::Options;
use unveil_core::trace::{DetachReason, TargetKind, TransitionCause, Tracer};
use unveil_debug::pretty::PrettyPrintSink;
use unveil_debug::recorder::{RecordedEvent, RecorderSink, decode};
use unveil_harness::{ElementHandle, ScriptedObserver, StaticLookup};

const NONE: NoLookup<ElementHandle> = NoLookup::new();

fn traced(
    options: &Options,
    instance: u32,
) -> (
    DisclosureController<ScriptedObserver>,
    ScriptedObserver,
    Rc<RefCell<RecorderSink>>,
) {
    let observer = ScriptedObserver::new();
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));
    let tracer = Tracer::new(InstanceId(instance), Box::new(Rc::clone(&recorder)));
    let c = DisclosureController::new(Config::from_options(options), observer.clone())
        .with_tracer(tracer);
    (c, observer, recorder)
}

fn names(recorder: &RefCell<RecorderSink>) -> Vec<&'static str> {
    decode(recorder.borrow().as_bytes())
        .map(|e| e.name())
        .collect()
}

#[test]
fn reveal_once_emits_full_lifecycle() {
    let (mut c, _observer, recorder) = traced(&Options::default(), 1);
    c.mount(Some(&ElementHandle(1)), &NONE);
    let watch = c.active_watch().expect("bound");
    c.on_records(watch, &[IntersectionRecord::flag(false)]);
    c.on_records(
        watch,
        &[IntersectionRecord::flag(true), IntersectionRecord::flag(false)],
    );
    c.on_records(watch, &[IntersectionRecord::flag(false)]);
    drop(c);

    assert_eq!(
        names(&recorder),
        [
            "Attach",
            "Records",
            "Records",
            "Transition",
            "Detach",
            "StaleRecords"
        ]
    );

    let bytes = recorder.borrow().as_bytes().to_vec();
    let events: Vec<_> = decode(&bytes).collect();
    let seqs: Vec<_> = events.iter().map(|e| e.stamp().seq).collect();
    assert_eq!(seqs, [0, 1, 2, 3, 4, 5]);
    assert!(events.iter().all(|e| e.stamp().instance == InstanceId(1)));

    match &events[2] {
        RecordedEvent::Records(e) => assert_eq!((e.is_intersecting, e.batch_len), (true, 2)),
        other => panic!("expected Records, got {other:?}"),
    }
    match &events[3] {
        RecordedEvent::Transition(e) => {
            assert_eq!(e.to, DisclosureState::Revealed);
            assert_eq!(e.cause, TransitionCause::Intersection);
        }
        other => panic!("expected Transition, got {other:?}"),
    }
    match &events[4] {
        RecordedEvent::Detach(e) => assert_eq!(e.reason, DetachReason::Revealed),
        other => panic!("expected Detach, got {other:?}"),
    }
}

#[test]
fn id_lookup_misses_and_losses_are_traced() {
    let lookup = StaticLookup::new();
    let (mut c, _observer, recorder) = traced(
        &Options::default().with_mode("toggle").with_id("panel-1"),
        2,
    );
    c.mount(None, &lookup);
    lookup.insert("panel-1", ElementHandle(5));
    c.mount(None, &lookup);
    lookup.remove("panel-1");
    c.mount(None, &lookup);
    c.teardown();

    let bytes = recorder.borrow().as_bytes().to_vec();
    let events: Vec<_> = decode(&bytes).collect();
    let summary: Vec<_> = events
        .iter()
        .map(|e| match e {
            RecordedEvent::TargetMissing(m) => format!("missing:{:?}", m.kind),
            RecordedEvent::Detach(d) => format!("detach:{:?}", d.reason),
            other => other.name().to_owned(),
        })
        .collect();
    assert_eq!(
        summary,
        ["missing:Id", "Attach", "missing:Id", "detach:TargetLost"]
    );
    assert!(matches!(
        events[0],
        RecordedEvent::TargetMissing(m) if m.kind == TargetKind::Id
    ));
}

#[test]
fn refusal_and_clicks_are_traced() {
    let (mut c, observer, recorder) = traced(&Options::default(), 3);
    observer.refuse_next(ObserveError::Unsupported);
    c.mount(Some(&ElementHandle(1)), &NONE);
    c.user_clicked();
    assert_eq!(names(&recorder), ["ObserveRefused", "Click"]);

    let (mut b, _observer, recorder) = traced(&Options::default().with_button_text("Go"), 4);
    b.user_clicked();
    b.user_clicked();
    assert_eq!(names(&recorder), ["Click", "Transition", "Click"]);
}

#[test]
fn pretty_sink_renders_a_session() {
    let out = Rc::new(RefCell::new(PrettyPrintSink::with_writer(Vec::<u8>::new())));
    let observer = ScriptedObserver::new();
    let mut c = DisclosureController::new(
        Config::from_options(&Options::default().with_threshold(50.0)),
        observer,
    )
    .with_tracer(Tracer::new(InstanceId(9), Box::new(Rc::clone(&out))));
    c.mount(Some(&ElementHandle(1)), &NONE);
    let watch = c.active_watch().expect("bound");
    c.on_records(watch, &[IntersectionRecord::flag(true)]);
    drop(c);

    let sink = Rc::try_unwrap(out)
        .expect("controller dropped its tracer")
        .into_inner();
    let text = String::from_utf8(sink.into_writer()).expect("utf-8");
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4, "got: {text}");
    assert_eq!(lines[0], "#9.0 [attach] gen1 threshold=0.50 margin=\"0px\"");
    assert_eq!(lines[2], "#9.2 [transition] hidden -> revealed by Intersection");
    assert_eq!(lines[3], "#9.3 [detach] gen1 reason=Revealed");
}
