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

//! Program access control.
//!
//! Rundowns belong to a program, and users get access to a program through a
//! membership with a [`Role`]. Owners hand out access with invite tokens:
//! a token names the program and the role it grants, expires after a number
//! of days and can be revoked. Redeeming a token creates or updates the
//! membership of the redeeming user.
//!
//! Every operation requires a [`Caller`], the identity of the signed-in user.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    error::AccessError,
    model::{Membership, Program, Role},
};

use super::model::{timestamp_from_sql, timestamp_to_sql};

/// Longest validity of an invite, in days.
pub(crate) const MAX_INVITE_DAYS: i64 = 30;

/// The identity of the signed-in user making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Caller {
    user_id: String,
}

impl Caller {
    pub(crate) fn new(user_id: &str) -> Result<Self, AccessError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(AccessError::Unauthenticated);
        }

        Ok(Self {
            user_id: user_id.to_string(),
        })
    }

    pub(crate) fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invite {
    pub(crate) token: String,
    pub(crate) program_id: String,
    pub(crate) role: Role,
    pub(crate) expires_at: DateTime<Utc>,
}

/// Returns the program the caller works in, creating one they own if they
/// have none yet.
///
/// Programs the caller owns are preferred over ones they were invited to.
pub(crate) fn ensure_program(
    conn: &mut Connection,
    caller: &Caller,
    name: &str,
) -> Result<Program, AccessError> {
    if let Some(program) = find_program(conn, caller)? {
        return Ok(program);
    }

    let program = Program {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
    };

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO programs (id, name) VALUES (?1, ?2)",
        params![program.id, program.name],
    )?;
    tx.execute(
        "INSERT INTO program_members (program_id, user_id, role) VALUES (?1, ?2, ?3)",
        params![program.id, caller.user_id(), Role::Owner],
    )?;
    tx.commit()?;

    log::info!("Created program '{}' for {}", program.name, caller.user_id());

    Ok(program)
}

fn find_program(conn: &Connection, caller: &Caller) -> Result<Option<Program>, AccessError> {
    let mut stmt = conn.prepare_cached(
        "SELECT p.id, p.name
         FROM programs p
         JOIN program_members m ON m.program_id = p.id
         WHERE m.user_id = ?
         ORDER BY CASE m.role WHEN 'owner' THEN 0 WHEN 'editor' THEN 1 ELSE 2 END, p.rowid",
    )?;

    let program = stmt
        .query_row([caller.user_id()], |r| {
            Ok(Program {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })
        .optional()?;

    Ok(program)
}

pub(crate) fn get_program(conn: &Connection, program_id: &str) -> Result<Option<Program>, AccessError> {
    let program = conn
        .query_row(
            "SELECT id, name FROM programs WHERE id = ?",
            [program_id],
            |r| {
                Ok(Program {
                    id: r.get(0)?,
                    name: r.get(1)?,
                })
            },
        )
        .optional()?;

    Ok(program)
}

/// The role of a user in a program, if they are a member.
pub(crate) fn role_of(conn: &Connection, program_id: &str, user_id: &str) -> Result<Option<Role>, AccessError> {
    let mut stmt = conn.prepare_cached(
        "SELECT role FROM program_members WHERE program_id = ?1 AND user_id = ?2",
    )?;

    let role = stmt
        .query_row(params![program_id, user_id], |r| r.get(0))
        .optional()?;

    Ok(role)
}

/// Lists the memberships of the caller.
pub(crate) fn list_memberships(conn: &Connection, caller: &Caller) -> Result<Vec<Membership>, AccessError> {
    let mut stmt = conn.prepare_cached(
        "SELECT program_id, user_id, role FROM program_members WHERE user_id = ? ORDER BY rowid",
    )?;

    let results = stmt
        .query_map([caller.user_id()], |r| {
            Ok(Membership {
                program_id: r.get(0)?,
                user_id: r.get(1)?,
                role: r.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Creates an invite granting `role` in a program.
///
/// # Errors
///
/// * [`AccessError::Forbidden`] if the caller does not own the program.
/// * [`AccessError::InvalidExpiry`] if `expires_in_days` is outside
///   `1..=MAX_INVITE_DAYS`.
pub(crate) fn create_invite(
    conn: &Connection,
    caller: &Caller,
    program_id: &str,
    role: Role,
    expires_in_days: i64,
    now: DateTime<Utc>,
) -> Result<Invite, AccessError> {
    require_owner(conn, caller, program_id)?;

    if !(1..=MAX_INVITE_DAYS).contains(&expires_in_days) {
        return Err(AccessError::InvalidExpiry {
            days: expires_in_days,
            max: MAX_INVITE_DAYS,
        });
    }

    let invite = Invite {
        token: new_token(),
        program_id: program_id.to_string(),
        role,
        expires_at: now + Duration::days(expires_in_days),
    };

    conn.execute(
        "INSERT INTO invites (token, program_id, role, created_by, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            invite.token,
            invite.program_id,
            invite.role,
            caller.user_id(),
            timestamp_to_sql(invite.expires_at)
        ],
    )?;

    log::info!(
        "{} invited a {} to program {}",
        caller.user_id(),
        role.key(),
        program_id
    );

    Ok(invite)
}

/// Redeems an invite token for the caller.
///
/// Redeeming the same token twice leaves a single membership. An owner who
/// redeems an invite for their own program keeps the owner role.
pub(crate) fn redeem_invite(
    conn: &Connection,
    caller: &Caller,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Membership, AccessError> {
    let found: Option<(String, Role, String, bool)> = conn
        .query_row(
            "SELECT program_id, role, expires_at, revoked FROM invites WHERE token = ?",
            [token.trim()],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;

    let Some((program_id, role, expires_at, revoked)) = found else {
        return Err(AccessError::InviteNotFound);
    };

    if revoked {
        return Err(AccessError::InviteRevoked);
    }

    if timestamp_from_sql(&expires_at)? <= now {
        return Err(AccessError::InviteExpired);
    }

    conn.execute(
        "INSERT INTO program_members (program_id, user_id, role) VALUES (?1, ?2, ?3)
         ON CONFLICT (program_id, user_id)
         DO UPDATE SET role = excluded.role WHERE program_members.role != 'owner'",
        params![program_id, caller.user_id(), role],
    )?;

    let role = role_of(conn, &program_id, caller.user_id())?.unwrap_or(role);

    log::info!("{} joined program {} as {}", caller.user_id(), program_id, role.key());

    Ok(Membership {
        program_id,
        user_id: caller.user_id().to_string(),
        role,
    })
}

/// Revokes an invite so it can no longer be redeemed.
pub(crate) fn revoke_invite(conn: &Connection, caller: &Caller, token: &str) -> Result<(), AccessError> {
    let program_id: Option<String> = conn
        .query_row(
            "SELECT program_id FROM invites WHERE token = ?",
            [token.trim()],
            |r| r.get(0),
        )
        .optional()?;

    let Some(program_id) = program_id else {
        return Err(AccessError::InviteNotFound);
    };

    require_owner(conn, caller, &program_id)?;

    conn.execute("UPDATE invites SET revoked = 1 WHERE token = ?", [token.trim()])?;

    Ok(())
}

fn require_owner(conn: &Connection, caller: &Caller, program_id: &str) -> Result<(), AccessError> {
    match role_of(conn, program_id, caller.user_id())? {
        Some(Role::Owner) => Ok(()),
        _ => Err(AccessError::Forbidden),
    }
}

fn new_token() -> String {
    format!("{:032x}", rand::random::<u128>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::open;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-18T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn setup() -> (Connection, Caller, Program) {
        let mut conn = open();
        let owner = Caller::new("anne").unwrap();
        let program = ensure_program(&mut conn, &owner, "Ochtendshow").unwrap();
        (conn, owner, program)
    }

    #[test]
    fn test_caller_requires_identity() {
        assert!(matches!(Caller::new("  "), Err(AccessError::Unauthenticated)));
    }

    #[test]
    fn test_ensure_program_is_stable() {
        let (mut conn, owner, program) = setup();
        let again = ensure_program(&mut conn, &owner, "Other name").unwrap();

        assert_eq!(again, program);
        assert_eq!(role_of(&conn, &program.id, "anne").unwrap(), Some(Role::Owner));
    }

    #[test]
    fn test_invite_and_redeem() {
        let (conn, owner, program) = setup();
        let invite = create_invite(&conn, &owner, &program.id, Role::Editor, 7, now()).unwrap();

        assert_eq!(invite.token.len(), 32);
        assert_eq!(invite.expires_at, now() + Duration::days(7));

        let guest = Caller::new("bram").unwrap();
        let membership = redeem_invite(&conn, &guest, &invite.token, now()).unwrap();
        assert_eq!(membership.role, Role::Editor);
        assert_eq!(membership.program_id, program.id);

        let again = redeem_invite(&conn, &guest, &invite.token, now()).unwrap();
        assert_eq!(again, membership);
        assert_eq!(list_memberships(&conn, &guest).unwrap().len(), 1);
    }

    #[test]
    fn test_only_owner_can_invite() {
        let (conn, owner, program) = setup();
        let invite = create_invite(&conn, &owner, &program.id, Role::Viewer, 1, now()).unwrap();

        let guest = Caller::new("bram").unwrap();
        redeem_invite(&conn, &guest, &invite.token, now()).unwrap();

        assert!(matches!(
            create_invite(&conn, &guest, &program.id, Role::Viewer, 1, now()),
            Err(AccessError::Forbidden)
        ));
        assert!(matches!(
            revoke_invite(&conn, &guest, &invite.token),
            Err(AccessError::Forbidden)
        ));
    }

    #[test]
    fn test_invite_expiry_bounds() {
        let (conn, owner, program) = setup();

        for days in [0, MAX_INVITE_DAYS + 1, -3] {
            assert!(matches!(
                create_invite(&conn, &owner, &program.id, Role::Viewer, days, now()),
                Err(AccessError::InvalidExpiry { .. })
            ));
        }
    }

    #[test]
    fn test_expired_invite() {
        let (conn, owner, program) = setup();
        let invite = create_invite(&conn, &owner, &program.id, Role::Viewer, 2, now()).unwrap();

        let later = now() + Duration::days(2);
        let guest = Caller::new("bram").unwrap();
        assert!(matches!(
            redeem_invite(&conn, &guest, &invite.token, later),
            Err(AccessError::InviteExpired)
        ));
    }

    #[test]
    fn test_revoked_invite() {
        let (conn, owner, program) = setup();
        let invite = create_invite(&conn, &owner, &program.id, Role::Viewer, 2, now()).unwrap();
        revoke_invite(&conn, &owner, &invite.token).unwrap();

        let guest = Caller::new("bram").unwrap();
        assert!(matches!(
            redeem_invite(&conn, &guest, &invite.token, now()),
            Err(AccessError::InviteRevoked)
        ));
        assert!(matches!(
            redeem_invite(&conn, &guest, "unknown", now()),
            Err(AccessError::InviteNotFound)
        ));
    }

    #[test]
    fn test_owner_is_never_downgraded() {
        let (conn, owner, program) = setup();
        let invite = create_invite(&conn, &owner, &program.id, Role::Viewer, 2, now()).unwrap();

        let membership = redeem_invite(&conn, &owner, &invite.token, now()).unwrap();
        assert_eq!(membership.role, Role::Owner);
    }
}
