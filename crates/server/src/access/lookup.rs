use shared_types::UserPermissions;

use super::AccessDenial;
use crate::auth::jwt::Claims;
use crate::repo::ProfileStore;

/// Look up the caller's role and assignments.
///
/// Never lets a request through on doubt: no identity, a failed lookup or
/// an unknown profile all become [`AccessDenial::Unresolvable`].
pub async fn resolve_caller(
    profiles: &dyn ProfileStore,
    claims: Option<&Claims>,
) -> Result<UserPermissions, AccessDenial> {
    let Some(claims) = claims else {
        tracing::warn!("permission check without an authenticated caller");
        return Err(AccessDenial::Unresolvable);
    };

    match profiles.fetch_permissions(claims.sub).await {
        Ok(Some(perms)) => Ok(perms),
        Ok(None) => {
            tracing::warn!(user_id = %claims.sub, "no profile for authenticated caller");
            Err(AccessDenial::Unresolvable)
        }
        Err(e) => {
            tracing::error!(user_id = %claims.sub, error = %e, "profile lookup failed");
            Err(AccessDenial::Unresolvable)
        }
    }
}
