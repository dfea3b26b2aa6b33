//! Participant roles and competing sides.

/// Identity of a connected participant.
///
/// Exactly one per participant, assigned at connection time and
/// immutable afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Master,
    Left,
    Right,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Master => "master",
            Role::Left => "left",
            Role::Right => "right",
        }
    }

    /// Try to parse from the wire representation (case-sensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "master" => Some(Role::Master),
            "left" => Some(Role::Left),
            "right" => Some(Role::Right),
            _ => None,
        }
    }

    /// The competing side this role plays, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Role::Master => None,
            Role::Left => Some(Side::Left),
            Role::Right => Some(Side::Right),
        }
    }
}

/// One of the two competing roles.
///
/// Armies, forwarded state updates, and the session winner are always
/// scoped to a side; the master never owns any of these.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Try to parse from the wire representation (case-sensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
