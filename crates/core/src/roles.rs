//! System role model.
//!
//! Roles arrive from storage as a `TEXT[]` column and from JWT claims as a
//! string list. Both are parsed into the closed [`Role`] set at the boundary
//! so authorization reads as a capability check rather than a string compare.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_TEACHER: &str = "TEACHER";

pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_TEACHER];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Teacher,
}

impl Role {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_TEACHER => Ok(Self::Teacher),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Teacher => ROLE_TEACHER,
        }
    }
}

/// Whether a raw role list grants the given capability.
///
/// Unknown strings in the list never grant anything.
pub fn has_role(roles: &[String], role: Role) -> bool {
    roles
        .iter()
        .any(|r| Role::parse(r).is_ok_and(|parsed| parsed == role))
}

/// Validate a role list from a create/update request.
///
/// Rejects empty lists and any entry outside the closed set.
pub fn validate_roles(roles: &[String]) -> Result<(), String> {
    if roles.is_empty() {
        return Err("At least one role is required".to_string());
    }
    for r in roles {
        Role::parse(r)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_roles() {
        assert_eq!(Role::parse("ADMIN").unwrap(), Role::Admin);
        assert_eq!(Role::parse("TEACHER").unwrap(), Role::Teacher);
    }

    #[test]
    fn parse_rejects_unknown_and_lowercase() {
        assert!(Role::parse("admin").is_err());
        assert!(Role::parse("SUPERUSER").is_err());
    }

    #[test]
    fn has_role_ignores_unknown_entries() {
        let roles = vec!["JANITOR".to_string(), "TEACHER".to_string()];
        assert!(has_role(&roles, Role::Teacher));
        assert!(!has_role(&roles, Role::Admin));
    }

    #[test]
    fn validate_roles_rejects_empty_list() {
        let err = validate_roles(&[]).unwrap_err();
        assert!(err.contains("At least one role"));
    }

    #[test]
    fn validate_roles_rejects_bad_entry() {
        let roles = vec!["ADMIN".to_string(), "WIZARD".to_string()];
        assert!(validate_roles(&roles).is_err());
    }
}
