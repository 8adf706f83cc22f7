use std::fmt;

/// Range of periodic groups treated as electron donors by the octet heuristic.
/// Groups 13-18 always accept electrons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OctetRange {
    /// only groups 1 and 2 lose electrons (alkali and alkaline earth metals)
    #[default]
    MainGroup,
    /// groups 1 through 12 lose as many electrons as their group number
    Extended,
}

impl OctetRange {
    /// last group that loses electrons
    pub fn last_donor_group(&self) -> u8 {
        match self {
            OctetRange::MainGroup => 2,
            OctetRange::Extended => 12,
        }
    }
}

/// How many electrons an element tends to lose or gain to complete an octet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctetNeed {
    Loses(u8),
    Gains(u8),
    Unknown,
}

impl OctetNeed {
    /// number of electrons moved, None if the group is not covered
    pub fn magnitude(&self) -> Option<i64> {
        match self {
            OctetNeed::Loses(n) | OctetNeed::Gains(n) => Some(*n as i64),
            OctetNeed::Unknown => None,
        }
    }

    /// provisional (unsigned) oxidation state, unknown groups contribute nothing
    pub fn or_zero(&self) -> i64 {
        self.magnitude().unwrap_or(0)
    }
}

impl fmt::Display for OctetNeed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OctetNeed::Loses(n) => write!(f, "loses {}", n),
            OctetNeed::Gains(n) => write!(f, "gains {}", n),
            OctetNeed::Unknown => write!(f, "unknown"),
        }
    }
}

/// Electrons needed to complete the octet for an element of periodic group `group`.
/// Total over its domain: groups outside the donor range and outside 13-18, or an absent group
/// (f-block, unclassified), give `OctetNeed::Unknown`.
pub fn octet_need(group: Option<u8>, range: OctetRange) -> OctetNeed {
    match group {
        Some(g) if g >= 1 && g <= range.last_donor_group() => OctetNeed::Loses(g),
        Some(g) if (13..=18).contains(&g) => OctetNeed::Gains(18 - g),
        _ => OctetNeed::Unknown,
    }
}

/// Largest single correction the neutrality loop may apply to an element of this group.
/// Alkali metals never go beyond +1 and alkaline earth metals beyond +2.
pub fn max_adjustment(group: Option<u8>, range: OctetRange) -> i64 {
    match group {
        Some(1) => 1,
        Some(2) => 2,
        _ => octet_need(group, range).or_zero(),
    }
}
