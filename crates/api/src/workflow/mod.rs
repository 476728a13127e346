//! Workflow orchestration support: permission resolution for publication
//! capabilities. The orchestrator operations themselves live in
//! [`crate::handlers::submission`] and [`crate::handlers::revision`].

pub mod permissions;
