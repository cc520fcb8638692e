// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Typed domain errors.
//!
//! Plumbing code propagates [`anyhow::Error`]; the errors here are the ones
//! callers are expected to match on or show verbatim to the user.

use thiserror::Error;

/// A user-entered value was rejected before reaching any collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("Titel mag niet leeg zijn")]
    EmptyTitle,

    #[error("Naam mag niet leeg zijn")]
    EmptyName,

    #[error("Ongeldige kleur '{0}', verwacht #rrggbb")]
    InvalidColour(String),

    #[error("Ongeldige datum '{0}', verwacht JJJJ-MM-DD")]
    InvalidDate(String),

    #[error("Onbekende status '{0}'")]
    UnknownStatus(String),

    #[error("Onbekende rol '{0}'")]
    UnknownRole(String),

    #[error("'{0}' is een ingebouwd type")]
    ReservedName(String),

    #[error("Ongeldige duur '{0}'")]
    InvalidDuration(String),
}

/// Failures of the invite and membership operations.
#[derive(Error, Debug)]
pub(crate) enum AccessError {
    #[error("Niet aangemeld")]
    Unauthenticated,

    #[error("Alleen eigenaren van het programma mogen dit")]
    Forbidden,

    #[error("Uitnodiging niet gevonden")]
    InviteNotFound,

    #[error("Uitnodiging is verlopen")]
    InviteExpired,

    #[error("Uitnodiging is ingetrokken")]
    InviteRevoked,

    #[error("Geldigheid van een uitnodiging moet tussen 1 en {max} dagen liggen, niet {days}")]
    InvalidExpiry { days: i64, max: i64 },

    #[error("Opslagfout: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_shown_verbatim() {
        assert_eq!(
            ValidationError::InvalidColour("rood".to_string()).to_string(),
            "Ongeldige kleur 'rood', verwacht #rrggbb"
        );
        assert_eq!(AccessError::InviteExpired.to_string(), "Uitnodiging is verlopen");
        assert_eq!(
            AccessError::InvalidExpiry { days: 60, max: 30 }.to_string(),
            "Geldigheid van een uitnodiging moet tussen 1 en 30 dagen liggen, niet 60"
        );
    }
}
