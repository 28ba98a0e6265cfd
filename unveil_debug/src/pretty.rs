// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Each line
//! starts with the instance and sequence number, e.g.
//! `#2.5 [detach] gen3 reason=Revealed`.

use std::io::Write;

use unveil_core::controller::DisclosureState;
use unveil_core::trace::{
    AttachEvent, ClickEvent, DetachEvent, ObserveRefusedEvent, RecordsEvent, StaleRecordsEvent,
    Stamp, TargetMissingEvent, TraceSink, TransitionEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn prefix(stamp: Stamp) -> String {
    format!("#{}.{}", stamp.instance.0, stamp.seq)
}

fn state_name(state: DisclosureState) -> &'static str {
    match state {
        DisclosureState::Hidden => "hidden",
        DisclosureState::Revealed => "revealed",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_attach(&mut self, e: &AttachEvent) {
        let _ = writeln!(
            self.writer,
            "{} [attach] gen{} threshold={:.2} margin=\"{}\"",
            prefix(e.stamp),
            e.watch.generation(),
            e.threshold,
            e.margin,
        );
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        let _ = writeln!(
            self.writer,
            "{} [detach] gen{} reason={:?}",
            prefix(e.stamp),
            e.watch.generation(),
            e.reason,
        );
    }

    fn on_records(&mut self, e: &RecordsEvent) {
        let _ = writeln!(
            self.writer,
            "{} [records] gen{} intersecting={} batch={}",
            prefix(e.stamp),
            e.watch.generation(),
            e.is_intersecting,
            e.batch_len,
        );
    }

    fn on_stale_records(&mut self, e: &StaleRecordsEvent) {
        let _ = writeln!(
            self.writer,
            "{} [stale] gen{} dropped={}",
            prefix(e.stamp),
            e.watch.generation(),
            e.batch_len,
        );
    }

    fn on_target_missing(&mut self, e: &TargetMissingEvent) {
        let _ = writeln!(
            self.writer,
            "{} [missing] lookup={:?}",
            prefix(e.stamp),
            e.kind
        );
    }

    fn on_observe_refused(&mut self, e: &ObserveRefusedEvent) {
        let _ = writeln!(
            self.writer,
            "{} [refused] gen{} {}",
            prefix(e.stamp),
            e.watch.generation(),
            e.error,
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "{} [transition] {} -> {} by {:?}",
            prefix(e.stamp),
            state_name(e.from),
            state_name(e.to),
            e.cause,
        );
    }

    fn on_click(&mut self, e: &ClickEvent) {
        let verdict = if e.accepted { "accepted" } else { "ignored" };
        let _ = writeln!(self.writer, "{} [click] {verdict}", prefix(e.stamp));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::id::{InstanceId, WatchId};
    use unveil_core::margin::RootMargin;
    use unveil_core::trace::{DetachReason, TransitionCause};

    fn stamp(seq: u64) -> Stamp {
        Stamp {
            instance: InstanceId(2),
            seq,
        }
    }

    #[test]
    fn pretty_print_attach_and_detach() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_attach(&AttachEvent {
            stamp: stamp(4),
            watch: WatchId::from_generation(3),
            threshold: 0.66,
            margin: RootMargin::parse("0px 20%").unwrap(),
        });
        sink.on_detach(&DetachEvent {
            stamp: stamp(5),
            watch: WatchId::from_generation(3),
            reason: DetachReason::Revealed,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "#2.4 [attach] gen3 threshold=0.66 margin=\"0px 20%\"",
                "#2.5 [detach] gen3 reason=Revealed",
            ]
        );
    }

    #[test]
    fn pretty_print_transition() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_transition(&TransitionEvent {
            stamp: stamp(0),
            from: DisclosureState::Hidden,
            to: DisclosureState::Revealed,
            cause: TransitionCause::Click,
        });
        sink.on_click(&ClickEvent {
            stamp: stamp(1),
            accepted: false,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.contains("hidden -> revealed by Click"), "got: {output}");
        assert!(output.contains("#2.1 [click] ignored"), "got: {output}");
    }

    #[test]
    fn stderr_sink_drives_a_tracer() {
        use unveil_core::trace::Tracer;

        let mut tracer = Tracer::new(InstanceId(1), Box::new(PrettyPrintSink::stderr()));
        tracer.click(true);
        tracer.detach(WatchId::from_generation(1), DetachReason::Teardown);
    }
}
