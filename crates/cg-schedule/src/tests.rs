//! Unit tests for cg-schedule.

use cg_core::{PlaceSlot, ScheduleKind};

use crate::{ScheduleCursor, ScheduleLibrary, ScheduleTemplate, Stop};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Tick `cursor` hour by hour and record every slot it enters.
fn walk(cursor: &mut ScheduleCursor, template: &ScheduleTemplate, hours: usize) -> Vec<(usize, PlaceSlot)> {
    let mut seen = Vec::new();
    for h in 1..=hours {
        if let Some(slot) = cursor.tick(1.0, template).arrived {
            seen.push((h, slot));
        }
    }
    seen
}

// ── ScheduleTemplate ──────────────────────────────────────────────────────────

#[cfg(test)]
mod template {
    use super::*;

    #[test]
    fn builtin_shapes() {
        let lib = ScheduleLibrary::builtin();
        assert_eq!(lib.get(ScheduleKind::Stationary).cycle_hours(), 24.0);
        assert_eq!(lib.get(ScheduleKind::Mobile).cycle_hours(), 24.0);
        assert_eq!(lib.get(ScheduleKind::Mobile).len(), 4);
        assert_eq!(lib.get(ScheduleKind::RemoteTravel).cycle_hours(), 144.0);
        assert_eq!(lib.get(ScheduleKind::ReturnTrip).cycle_hours(), 10.0);
    }

    #[test]
    fn mobile_enters_at_home() {
        let t = ScheduleTemplate::builtin(ScheduleKind::Mobile);
        assert_eq!(t.entry_position(), 3);
        assert_eq!(t.slot_at(3), PlaceSlot::Home);
        assert_eq!(t.hours_at(3), 14.0);
    }

    #[test]
    fn empty_template_is_home_for_zero_hours() {
        let t = ScheduleTemplate::empty(ScheduleKind::Stationary);
        assert!(t.is_empty());
        assert_eq!(t.slot_at(0), PlaceSlot::Home);
        assert_eq!(t.hours_at(0), 0.0);
        assert_eq!(t.next_position(0), 0);
    }

    #[test]
    fn rejects_bad_templates() {
        let one = vec![Stop::new(PlaceSlot::Home, 1.0)];
        assert!(ScheduleTemplate::new(ScheduleKind::Mobile, one, 1).is_err());
        let neg = vec![Stop::new(PlaceSlot::Home, -1.0)];
        assert!(ScheduleTemplate::new(ScheduleKind::Mobile, neg, 0).is_err());
        let zero = vec![Stop::new(PlaceSlot::Home, 0.0), Stop::new(PlaceSlot::Work, 0.0)];
        assert!(ScheduleTemplate::new(ScheduleKind::Mobile, zero, 0).is_err());
    }

    #[test]
    fn library_replacement() {
        let custom = ScheduleTemplate::new(
            ScheduleKind::Stationary,
            vec![Stop::new(PlaceSlot::Work, 2.0), Stop::new(PlaceSlot::Home, 2.0)],
            0,
        )
        .unwrap();
        let lib = ScheduleLibrary::builtin().with_template(custom.clone());
        assert_eq!(lib.get(ScheduleKind::Stationary), &custom);
        assert_eq!(lib.get(ScheduleKind::Mobile).len(), 4);
    }
}

// ── ScheduleCursor ────────────────────────────────────────────────────────────

#[cfg(test)]
mod cursor {
    use super::*;

    #[test]
    fn mobile_cycles_with_period_four() {
        let t = ScheduleTemplate::builtin(ScheduleKind::Mobile);
        let mut c = ScheduleCursor::start(&t);
        assert_eq!(c.slot(&t), PlaceSlot::Home);

        let seen = walk(&mut c, &t, 48);
        assert_eq!(
            seen,
            vec![
                (14, PlaceSlot::Vehicle),
                (15, PlaceSlot::Work),
                (23, PlaceSlot::Vehicle),
                (24, PlaceSlot::Home),
                (38, PlaceSlot::Vehicle),
                (39, PlaceSlot::Work),
                (47, PlaceSlot::Vehicle),
                (48, PlaceSlot::Home),
            ]
        );
    }

    #[test]
    fn stays_match_durations() {
        let t = ScheduleTemplate::builtin(ScheduleKind::Mobile);
        let mut c = ScheduleCursor::start(&t);
        walk(&mut c, &t, 14);
        let stays: Vec<f64> = (0..4)
            .map(|_| {
                let mut h = 0.0;
                loop {
                    h += 1.0;
                    if c.tick(1.0, &t).moved() {
                        break h;
                    }
                }
            })
            .collect();
        assert_eq!(stays, vec![1.0, 8.0, 1.0, 14.0]);
    }

    #[test]
    fn reports_completed_cycles() {
        let t = ScheduleTemplate::builtin(ScheduleKind::ReturnTrip);
        let mut c = ScheduleCursor::start(&t);
        assert_eq!(c.slot(&t), PlaceSlot::Vehicle);
        let mut completed = 0;
        for _ in 0..10 {
            completed += c.tick(1.0, &t).cycles_completed;
        }
        assert_eq!(completed, 1);
        assert_eq!(c.slot(&t), PlaceSlot::Vehicle);
    }

    #[test]
    fn long_step_advances_more_than_once() {
        let t = ScheduleTemplate::builtin(ScheduleKind::Mobile);
        let mut c = ScheduleCursor::start(&t);
        // 14h home, 1h vehicle, then 8h work: a 16h step lands at work.
        let out = c.tick(16.0, &t);
        assert_eq!(out.advances, 2);
        assert_eq!(out.arrived, Some(PlaceSlot::Work));
        assert_eq!(c.timer, 7.0);
    }

    #[test]
    fn empty_template_never_advances() {
        let t = ScheduleTemplate::empty(ScheduleKind::Stationary);
        let mut c = ScheduleCursor::start(&t);
        for _ in 0..100 {
            assert!(!c.tick(5.0, &t).moved());
        }
        assert_eq!(c.slot(&t), PlaceSlot::Home);
        assert_eq!(c.position, 0);
    }

    #[test]
    fn reset_discards_countdown() {
        let lib = ScheduleLibrary::builtin();
        let mobile = lib.get(ScheduleKind::Mobile);
        let mut c = ScheduleCursor::start(mobile);
        walk(&mut c, mobile, 17);
        assert_eq!(c.slot(mobile), PlaceSlot::Work);

        let trip = lib.get(ScheduleKind::RemoteTravel);
        assert_eq!(c.reset(trip), PlaceSlot::Vehicle);
        assert_eq!(c.kind, ScheduleKind::RemoteTravel);
        assert_eq!(c.timer, 8.0);
    }
}
