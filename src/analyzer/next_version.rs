use crate::domain::{BranchContext, Version, VersionBump};
use crate::error::{ReleaseError, Result};
use crate::release::Release;

/// Version used when nothing has been released yet
pub const FIRST_RELEASE: (u64, u64, u64) = (1, 0, 0);

/// Counter that seeds a new prerelease track
pub const FIRST_PRERELEASE: u64 = 1;

/// Compute the tentative next version from the last release and the commit bump.
///
/// - nothing released: `1.0.0`, or `1.0.0-{id}.1` on a prerelease branch
/// - release branch: bump the last version
/// - prerelease branch, last release on the same track: next prerelease iteration
/// - prerelease branch otherwise: bump the core and start the track at `.1`
pub fn next_version(
    branch: &BranchContext,
    last_release: Option<&Release>,
    bump: VersionBump,
) -> Result<Version> {
    let (major, minor, patch) = FIRST_RELEASE;

    let Some(identifier) = branch.prerelease_identifier() else {
        return match last_release {
            Some(last) => last.version.bump(bump),
            None => Ok(Version::new(major, minor, patch)),
        };
    };

    match last_release {
        None => Version::new(major, minor, patch).with_prerelease(identifier, FIRST_PRERELEASE),
        Some(last) if last.version.channel() == branch.channel => {
            last.version.next_prerelease().map_err(|e| {
                ReleaseError::version(format!(
                    "Cannot continue '{}' track from {}: {}",
                    identifier, last.version, e
                ))
            })
        }
        Some(last) => last
            .version
            .bump(bump)?
            .with_prerelease(identifier, FIRST_PRERELEASE),
    }
}
