//! External verification of resume claims.
//!
//! Two verifiers: [`RegistryVerifier`] checks employer names against free
//! public company registries, and [`CandidateVerifier`] checks candidate
//! identity URLs (GitHub with repo-level skill evidence, LinkedIn slug
//! matching, portfolio reachability). Both return structured reports and
//! never propagate network failures to the caller.

pub mod candidate;
pub mod error;
pub mod registry;
pub mod types;

mod skills;

pub use candidate::CandidateVerifier;
pub use error::VerifyError;
pub use registry::{RegistryEndpoints, RegistryVerifier};
pub use types::{
    CandidateVerification, CompanyStatus, CompanyVerification, GithubReport, GithubStatus,
    LinkedinReport, LinkedinStatus, PortfolioReport, RegistryHit, RepoDetail, SkillMatch,
    SkillMismatch,
};
