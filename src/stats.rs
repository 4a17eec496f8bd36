//! Statistics snapshot handed to the dashboard once per tick.

/// Counters and elapsed simulated time for one redraw.
///
/// Owned by the caller; the dashboard only reads it during `tick`.
/// `elapsed_ms` is expected never to decrease between ticks, but this is
/// not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatsSnapshot {
    /// OS level: files created by the simulated OS.
    pub files_created: u64,
    /// User level: streams successfully created.
    pub streams_created: u64,
    /// User level: stream creations rejected as duplicate names.
    pub stream_name_duplicates: u64,
    /// User level: stream creations rejected because the pending-name
    /// reservation table was full.
    pub stream_name_reservation_limit_exceeded: u64,
    /// Simulated time since the run started, in milliseconds.
    pub elapsed_ms: u64,
}

impl StatsSnapshot {
    /// A snapshot with all counters zero at the given time.
    pub const fn at(elapsed_ms: u64) -> Self {
        Self {
            files_created: 0,
            streams_created: 0,
            stream_name_duplicates: 0,
            stream_name_reservation_limit_exceeded: 0,
            elapsed_ms,
        }
    }

    /// Read one counter.
    pub const fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::StreamsCreated => self.streams_created,
            Counter::StreamNameDuplicates => self.stream_name_duplicates,
            Counter::StreamNameReservationLimitExceeded => {
                self.stream_name_reservation_limit_exceeded
            }
            Counter::FilesCreated => self.files_created,
        }
    }
}

/// Which section of the stats band a counter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Counters observed by the simulated user.
    User,
    /// Counters observed by the simulated OS.
    Os,
}

impl Section {
    /// Both sections, in display order.
    pub const ALL: [Self; 2] = [Self::User, Self::Os];

    /// Header text.
    pub const fn header(self) -> &'static str {
        match self {
            Self::User => "User Stats",
            Self::Os => "OS Stats",
        }
    }

    /// Row of the header within the stats region.
    pub const fn header_row(self) -> u16 {
        match self {
            Self::User => 1,
            Self::Os => 5,
        }
    }
}

/// One displayed counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// [`StatsSnapshot::streams_created`]
    StreamsCreated,
    /// [`StatsSnapshot::stream_name_duplicates`]
    StreamNameDuplicates,
    /// [`StatsSnapshot::stream_name_reservation_limit_exceeded`]
    StreamNameReservationLimitExceeded,
    /// [`StatsSnapshot::files_created`]
    FilesCreated,
}

impl Counter {
    /// All counters, in display order.
    pub const ALL: [Self; 4] = [
        Self::StreamsCreated,
        Self::StreamNameDuplicates,
        Self::StreamNameReservationLimitExceeded,
        Self::FilesCreated,
    ];

    /// Static label drawn once at init.
    pub const fn label(self) -> &'static str {
        match self {
            Self::StreamsCreated => "Streams Created:",
            Self::StreamNameDuplicates => "Stream Name Duplicates:",
            Self::StreamNameReservationLimitExceeded => "Pending Stream Name Limit Reached:",
            Self::FilesCreated => "Files Created:",
        }
    }

    /// Fixed row within the stats region. Never changes.
    pub const fn row(self) -> u16 {
        match self {
            Self::StreamsCreated => 2,
            Self::StreamNameDuplicates => 3,
            Self::StreamNameReservationLimitExceeded => 4,
            Self::FilesCreated => 6,
        }
    }

    /// Section the counter is listed under.
    pub const fn section(self) -> Section {
        match self {
            Self::FilesCreated => Section::Os,
            _ => Section::User,
        }
    }
}
