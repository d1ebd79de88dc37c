//! Integration tests for isim-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, POSITION_HEADERS, SUMMARY_HEADERS};
    use crate::row::{AgentPositionRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn position(agent_id: u32, destination: Option<(f64, f64)>) -> AgentPositionRow {
        AgentPositionRow {
            agent_id,
            time:   2.0,
            kind:   "bike",
            x:      1.5,
            y:      -4.0,
            active: true,
            moving: false,
            destination,
        }
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_positions.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, POSITION_HEADERS);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SUMMARY_HEADERS);
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("agent_positions.csv").exists());
    }

    #[test]
    fn directory_that_is_a_file_errors() {
        let dir = tmp();
        let file = dir.path().join("taken");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(CsvWriter::new(&file), Err(OutputError::Io(_))));
    }

    #[test]
    fn position_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_positions(&[position(0, Some((10.0, 0.5))), position(1, None)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_positions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][1], "2");
        assert_eq!(&rows[0][2], "bike");
        assert_eq!(&rows[0][3], "1.5");
        assert_eq!(&rows[0][4], "-4");
        assert_eq!(&rows[0][5], "1");
        assert_eq!(&rows[0][6], "0");
        assert_eq!(&rows[0][7], "10");
        assert_eq!(&rows[0][8], "0.5");
        // No destination leaves both columns empty.
        assert_eq!(&rows[1][7], "");
        assert_eq!(&rows[1][8], "");
    }

    #[test]
    fn summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            time:          3.5,
            active_agents: 7,
            moving_agents: 4,
            events:        2,
            brakes:        1,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3.5", "7", "4", "2", "1"]);
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Observer driven by a real world ───────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::io;

    use isim_core::{AgentKind, SimConfig};
    use isim_events::{ScenarioEvent, TimedQueue};
    use isim_geom::Coord;
    use isim_mobility::{StationaryProvider, WaypointProvider};
    use isim_sim::WorldBuilder;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{AgentPositionRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn c(x: f64, y: f64) -> Coord {
        Coord::new(x, y)
    }

    fn crossing_world(end_time: f64) -> isim_sim::World {
        let cfg = SimConfig { end_time, randomize_update_order: false, ..SimConfig::default() };
        let mut events = TimedQueue::new();
        events.push(isim_core::SimTime(1.5), ScenarioEvent::SwitchDirection).unwrap();
        WorldBuilder::new(cfg)
            .agent(AgentKind::ManualCar, Box::new(WaypointProvider::single(vec![c(0.0, 0.0), c(20.0, 0.0)], 10.0)))
            .agent(AgentKind::Bike, Box::new(WaypointProvider::single(vec![c(6.0, -4.0), c(6.0, 10.0)], 8.0)))
            .agent(AgentKind::Intersection, Box::new(StationaryProvider::new(c(50.0, 50.0))))
            .event_source(Box::new(events))
            .build()
            .unwrap()
    }

    #[test]
    fn run_writes_summaries_and_sampled_positions() {
        let dir = tempfile::tempdir().unwrap();
        let mut world = crossing_world(4.0);
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap()).snapshot_every(2);
        world.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 4);
        // time, active, moving, events, brakes
        assert_eq!(summaries[0].iter().collect::<Vec<_>>(), ["1", "3", "2", "0", "1"]);
        assert_eq!(&summaries[1][3], "1");

        // Ticks 1 and 3 of 4, three agents each.
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_positions.csv")).unwrap();
        let positions: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(positions.len(), 6);
        let braked = &positions[0];
        assert_eq!(
            braked.iter().collect::<Vec<_>>(),
            ["0", "1", "manual_car", "3", "0", "1", "1", "20", "0"]
        );
        assert_eq!(&positions[2][2], "intersection");
        assert_eq!(&positions[3][1], "3");
    }

    struct Failing {
        calls: usize,
    }

    impl OutputWriter for Failing {
        fn write_positions(&mut self, _: &[AgentPositionRow]) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(io::Error::other("positions")))
        }
        fn write_tick_summary(&mut self, _: &TickSummaryRow) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(io::Error::other("summary")))
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept_and_run_continues() {
        let mut world = crossing_world(3.0);
        let mut obs = SimOutputObserver::new(Failing { calls: 0 });
        world.run(&mut obs).unwrap();

        let err = obs.take_error().expect("stored error");
        assert_eq!(err.to_string(), "I/O error: summary");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 6);
    }
}
