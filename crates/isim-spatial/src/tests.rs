//! Unit tests for isim-spatial.

#[cfg(test)]
mod helpers {
    use isim_core::{AgentId, AgentKind};
    use isim_geom::Coord;
    use isim_mobility::{Agent, MovementRecord, Path, StationaryProvider};

    pub fn c(x: f64, y: f64) -> Coord {
        Coord::new(x, y)
    }

    /// An agent standing at `end` with a finished record for `start → end`.
    pub fn moved(id: u32, route: &[Coord], start: Coord, end: Coord, speed: f64) -> Agent {
        let mut a = Agent::new(AgentId(id), AgentKind::ManualCar, Box::new(StationaryProvider::new(end)));
        let mut r = MovementRecord::new(AgentId(id), start, 1.0, Path::from_coords(route.to_vec()));
        r.ending = Some(end);
        r.speed = speed;
        r.calculate_active_window();
        a.set_record(Some(r));
        a
    }

    pub fn parked(id: u32, at: Coord) -> Agent {
        Agent::new(AgentId(id), AgentKind::ManualCar, Box::new(StationaryProvider::new(at)))
    }
}

#[cfg(test)]
mod proximity {
    use isim_core::AgentId;

    use super::helpers::c;
    use crate::{LinearScan, ProximityIndex, RTreeIndex};

    fn points() -> Vec<(AgentId, isim_geom::Coord)> {
        vec![
            (AgentId(3), c(10.0, 0.0)),
            (AgentId(0), c(0.0, 0.0)),
            (AgentId(1), c(60.0, 0.0)),
            (AgentId(2), c(0.0, 49.0)),
        ]
    }

    #[test]
    fn linear_scan_ascending() {
        let idx = LinearScan::build(points());
        assert_eq!(idx.within(c(0.0, 0.0), 50.0), vec![AgentId(0), AgentId(2), AgentId(3)]);
    }

    #[test]
    fn rtree_matches_linear_scan() {
        let lin = LinearScan::build(points());
        let tree = RTreeIndex::build(points());
        assert_eq!(tree.len(), 4);
        for (center, r) in [(c(0.0, 0.0), 50.0), (c(55.0, 0.0), 10.0), (c(500.0, 0.0), 1.0)] {
            assert_eq!(tree.within(center, r), lin.within(center, r));
        }
    }

    #[test]
    fn relocated_entries_answer_from_the_new_spot() {
        let mut lin = LinearScan::build(points());
        let mut tree = RTreeIndex::build(points());
        let indexes: [&mut dyn ProximityIndex; 2] = [&mut lin, &mut tree];
        for idx in indexes {
            idx.relocate(AgentId(1), c(60.0, 0.0), c(20.0, 0.0));
            assert_eq!(idx.within(c(0.0, 0.0), 50.0), vec![AgentId(0), AgentId(1), AgentId(2), AgentId(3)]);
            assert!(idx.within(c(60.0, 0.0), 10.0).is_empty());
            // Unknown agents leave the index unchanged.
            idx.relocate(AgentId(9), c(0.0, 0.0), c(60.0, 0.0));
            assert!(idx.within(c(60.0, 0.0), 10.0).is_empty());
        }
        assert_eq!(tree.len(), 4);
    }
}

#[cfg(test)]
mod avoidance {
    use isim_core::AgentId;

    use super::helpers::{c, moved, parked};
    use crate::{avoid_collisions, BrakeCause, LinearScan};

    fn run(agents: &[isim_mobility::Agent], me: usize) -> (isim_geom::Coord, isim_mobility::MovementRecord, Option<crate::Brake>) {
        let index = LinearScan::build(agents.iter().map(|a| (a.id, a.location)));
        let mut loc = agents[me].location;
        let mut rec = agents[me].record().cloned().unwrap();
        let brake = avoid_collisions(agents[me].id, &mut loc, &mut rec, agents, &index, 50.0);
        (loc, rec, brake)
    }

    #[test]
    fn crossing_lines_brake_to_midpoint() {
        let agents = vec![
            moved(0, &[c(0.0, 0.0), c(20.0, 0.0)], c(0.0, 0.0), c(10.0, 0.0), 10.0),
            moved(1, &[c(6.0, -10.0), c(6.0, 10.0)], c(6.0, -4.0), c(6.0, 4.0), 8.0),
        ];
        let (loc, rec, brake) = run(&agents, 0);
        let brake = brake.unwrap();
        assert_eq!(brake.cause, BrakeCause::Crossing);
        assert_eq!(brake.other, AgentId(1));
        assert_eq!(loc, c(3.0, 0.0));
        assert_eq!(rec.ending, Some(c(3.0, 0.0)));
    }

    #[test]
    fn crossing_a_stopped_agent_is_ignored() {
        let agents = vec![
            moved(0, &[c(0.0, 0.0), c(20.0, 0.0)], c(0.0, 0.0), c(10.0, 0.0), 10.0),
            moved(1, &[c(6.0, -10.0), c(6.0, 10.0)], c(6.0, 0.0), c(6.0, 0.0), 0.0),
        ];
        let (loc, _, brake) = run(&agents, 0);
        assert!(brake.is_none());
        assert_eq!(loc, c(10.0, 0.0));
    }

    #[test]
    fn overrun_last_candidate_wins() {
        let road = [c(0.0, 0.0), c(100.0, 0.0)];
        let agents = vec![
            moved(0, &road, c(0.0, 0.0), c(10.0, 0.0), 10.0),
            moved(1, &road, c(4.0, 0.0), c(6.0, 0.0), 2.0),
            moved(2, &road, c(8.0, 0.0), c(9.0, 0.0), 1.0),
        ];
        let (loc, rec, brake) = run(&agents, 0);
        let brake = brake.unwrap();
        assert_eq!(brake.cause, BrakeCause::Overrun);
        assert_eq!(brake.other, AgentId(2));
        assert_eq!(loc, c(4.0, 0.0));
        assert_eq!(rec.ending, Some(c(4.0, 0.0)));
    }

    #[test]
    fn out_of_radius_or_without_record_is_skipped() {
        let agents = vec![
            moved(0, &[c(0.0, 0.0), c(200.0, 0.0)], c(0.0, 0.0), c(10.0, 0.0), 10.0),
            moved(1, &[c(0.0, 0.0), c(200.0, 0.0)], c(100.0, 0.0), c(101.0, 0.0), 1.0),
            parked(2, c(12.0, 0.0)),
        ];
        let (loc, _, brake) = run(&agents, 0);
        assert!(brake.is_none());
        assert_eq!(loc, c(10.0, 0.0));
    }
}

#[cfg(test)]
mod zones {
    use isim_core::{AgentId, AgentKind};
    use isim_mobility::{Agent, StationaryProvider};

    use super::helpers::{c, parked};
    use crate::{select_neighbors, Direction, Zones};

    fn population() -> Vec<Agent> {
        vec![
            parked(0, c(166.0, 10.0)),
            parked(1, c(120.0, 68.0)),
            Agent::new(AgentId(2), AgentKind::Intersection, Box::new(StationaryProvider::new(c(166.0, 68.0)))),
            parked(3, c(0.0, 0.0)),
        ]
    }

    #[test]
    fn active_zone_follows_direction() {
        let agents = population();
        let zones = Zones::reference_intersection();
        let hub = Some(AgentId(2));

        let ns = select_neighbors(&agents, Some(&zones), Direction::NorthSouth, hub);
        assert!(ns.contains(&AgentId(0)));
        assert!(!ns.contains(&AgentId(1)));
        assert!(!ns.contains(&AgentId(2)));

        let ew = select_neighbors(&agents, Some(&zones), Direction::NorthSouth.toggled(), hub);
        assert!(ew.contains(&AgentId(1)));
        assert!(!ew.contains(&AgentId(0)));
        assert!(!ew.contains(&AgentId(2)));
    }

    #[test]
    fn no_zones_selects_everyone_but_the_hub() {
        let agents = population();
        let all = select_neighbors(&agents, None, Direction::EastWest, Some(AgentId(2)));
        assert_eq!(all.len(), 3);
        assert!(!all.contains(&AgentId(2)));
    }
}
