//! Agent role tag, assigned once at construction.

/// What an agent is.  Exactly one agent per world may be the
/// [`Intersection`](AgentKind::Intersection) hub.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentKind {
    SelfDrivingCar,
    #[default]
    ManualCar,
    Pedestrian,
    Bike,
    Bus,
    /// The stationary intersection controller.  Never part of a neighbour set.
    Intersection,
}

impl AgentKind {
    /// `true` for the intersection hub.
    #[inline]
    pub fn is_hub(self) -> bool {
        matches!(self, AgentKind::Intersection)
    }

    /// `true` for road vehicles (everything but pedestrians and the hub).
    #[inline]
    pub fn is_vehicle(self) -> bool {
        matches!(
            self,
            AgentKind::SelfDrivingCar | AgentKind::ManualCar | AgentKind::Bike | AgentKind::Bus
        )
    }

    /// Label used in CSV output and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::SelfDrivingCar => "self_driving_car",
            AgentKind::ManualCar      => "manual_car",
            AgentKind::Pedestrian     => "pedestrian",
            AgentKind::Bike           => "bike",
            AgentKind::Bus            => "bus",
            AgentKind::Intersection   => "intersection",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
