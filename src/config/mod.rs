mod policy;
mod project;

pub use policy::Policy;
pub use project::ProjectConfig;
