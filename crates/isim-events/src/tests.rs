//! Unit tests for isim-events.

#[cfg(test)]
mod timed_queue {
    use isim_core::SimTime;

    use crate::{EventError, EventSource, TimedQueue};

    #[test]
    fn pops_in_time_order_fifo_on_ties() {
        let mut q = TimedQueue::new();
        q.push(SimTime(5.0), "c").unwrap();
        q.push(SimTime(1.0), "a").unwrap();
        q.push(SimTime(5.0), "d").unwrap();
        q.push(SimTime(2.0), "b").unwrap();
        assert_eq!(q.len(), 4);

        let mut out = Vec::new();
        while let Some(e) = q.pop_next() {
            out.push(e);
        }
        assert_eq!(out, vec!["a", "b", "c", "d"]);
        assert!(q.is_empty());
        assert!(q.next_event_time().is_never());
    }

    #[test]
    fn rejects_non_finite_times() {
        let mut q = TimedQueue::new();
        assert!(matches!(q.push(SimTime(f64::NAN), ()), Err(EventError::InvalidTime(_))));
        assert!(matches!(q.push(SimTime::NEVER, ()), Err(EventError::InvalidTime(_))));
        assert!(q.is_empty());
    }
}

#[cfg(test)]
mod scheduled {
    use isim_core::SimTime;

    use crate::{EventSource, ScheduledUpdates};

    #[test]
    fn duplicates_collapse() {
        let mut s = ScheduledUpdates::new();
        s.schedule(SimTime(3.0)).unwrap();
        s.schedule(SimTime(3.0)).unwrap();
        s.schedule(SimTime(1.0)).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.pop_next(), Some(SimTime(1.0)));
        assert_eq!(s.pop_next(), Some(SimTime(3.0)));
        assert_eq!(s.pop_next(), None);
    }
}

#[cfg(test)]
mod merge {
    use isim_core::SimTime;

    use crate::{EventMerge, EventSource, Merged, Slot, TimedQueue};

    fn queue(items: &[(f64, u32)]) -> Box<TimedQueue<u32>> {
        let mut q = TimedQueue::new();
        for &(t, e) in items {
            q.push(SimTime(t), e).unwrap();
        }
        Box::new(q)
    }

    #[test]
    fn empty_merge_is_never() {
        let mut m: EventMerge<u32> = EventMerge::new();
        assert!(m.next_event_time().is_never());
        assert!(m.pop_next().is_none());
    }

    #[test]
    fn picks_strictly_earliest() {
        let mut m = EventMerge::new();
        m.register(queue(&[(4.0, 40)]));
        m.register(queue(&[(2.0, 20), (6.0, 60)]));
        assert_eq!(m.source_count(), 2);
        assert_eq!(m.next_event_time(), SimTime(2.0));
        assert_eq!(m.pop_next(), Some((SimTime(2.0), Merged::External(20))));
        assert_eq!(m.pop_next(), Some((SimTime(4.0), Merged::External(40))));
        assert_eq!(m.pop_next(), Some((SimTime(6.0), Merged::External(60))));
        assert!(m.pop_next().is_none());
    }

    #[test]
    fn ties_go_to_earlier_registration_scheduled_first() {
        let mut m = EventMerge::new();
        m.register(queue(&[(1.0, 1)]));
        m.register(queue(&[(1.0, 2)]));
        m.schedule_update(SimTime(1.0)).unwrap();

        assert_eq!(m.pop_next(), Some((SimTime(1.0), Merged::ScheduledUpdate)));
        assert_eq!(m.pop_next(), Some((SimTime(1.0), Merged::External(1))));
        assert_eq!(m.pop_next(), Some((SimTime(1.0), Merged::External(2))));
    }

    #[test]
    fn selection_is_recomputed_after_push() {
        let mut m: EventMerge<u32> = EventMerge::new();
        m.register(queue(&[(10.0, 1)]));
        assert_eq!(m.next_event_time(), SimTime(10.0));
        m.schedule_update(SimTime(3.0)).unwrap();
        assert_eq!(m.next_event_time(), SimTime(3.0));
        assert_eq!(m.scheduled().next_event_time(), SimTime(3.0));
    }

    #[test]
    fn peek_names_the_source() {
        let mut m = EventMerge::new();
        assert_eq!(m.peek(), None);
        m.register(queue(&[(5.0, 1)]));
        m.register(queue(&[(2.0, 2)]));
        assert_eq!(m.peek(), Some((Slot::Source(1), SimTime(2.0))));
        m.schedule_update(SimTime(2.0)).unwrap();
        assert_eq!(m.peek(), Some((Slot::Scheduled, SimTime(2.0))));
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use isim_core::{AgentId, SimTime};
    use isim_geom::Coord;

    use crate::{load_events_reader, EventError, EventSource, ScenarioEvent};

    #[test]
    fn parses_every_kind_in_time_order() {
        let csv = "time,kind,agent,x,y\n\
                   5.0,switch_direction,,,\n\
                   7.5,deactivate,3,,\n\
                   9.0,activate,3,,\n\
                   2.0,set_location,1,166.0,40.0\n\
                   0.0,schedule_update,,30.0,\n";
        let mut q = load_events_reader(Cursor::new(csv)).unwrap();
        assert_eq!(q.len(), 5);

        assert_eq!(q.pop_next(), Some(ScenarioEvent::ScheduleUpdate { at: SimTime(30.0) }));
        assert_eq!(
            q.pop_next(),
            Some(ScenarioEvent::SetLocation { agent: AgentId(1), at: Coord::new(166.0, 40.0) })
        );
        assert_eq!(q.pop_next(), Some(ScenarioEvent::SwitchDirection));
        assert_eq!(q.next_event_time(), SimTime(7.5));
        assert_eq!(q.pop_next(), Some(ScenarioEvent::SetActive { agent: AgentId(3), active: false }));
        assert_eq!(q.pop_next(), Some(ScenarioEvent::SetActive { agent: AgentId(3), active: true }));
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let csv = "time,kind,agent,x,y\n1.0,teleport,0,1.0,1.0\n";
        let err = load_events_reader(Cursor::new(csv)).err().unwrap();
        assert!(matches!(err, EventError::Parse(ref m) if m.contains("teleport")));
    }

    #[test]
    fn missing_agent_is_a_parse_error() {
        let csv = "time,kind,agent,x,y\n1.0,activate,,,\n";
        assert!(matches!(load_events_reader(Cursor::new(csv)), Err(EventError::Parse(_))));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        for (x, y) in [("NaN", "0"), ("0", "inf"), ("-inf", "1")] {
            let csv = format!("time,kind,agent,x,y\n0.5,set_location,0,{x},{y}\n");
            let err = load_events_reader(Cursor::new(csv)).err().unwrap();
            assert!(matches!(err, EventError::Parse(ref m) if m.starts_with("row 1:")), "{x},{y}: {err}");
        }
        let csv = "time,kind,agent,x,y\n0.5,schedule_update,,NaN,\n";
        assert!(matches!(load_events_reader(Cursor::new(csv)), Err(EventError::Parse(_))));
    }

    #[test]
    fn bad_number_is_a_parse_error() {
        let csv = "time,kind,agent,x,y\nsoon,switch_direction,,,\n";
        assert!(matches!(load_events_reader(Cursor::new(csv)), Err(EventError::Parse(_))));
    }
}

#[cfg(test)]
mod event {
    use crate::ScenarioEvent;

    #[test]
    fn display_names_the_kind() {
        assert_eq!(ScenarioEvent::SwitchDirection.to_string(), "switch_direction");
    }
}
