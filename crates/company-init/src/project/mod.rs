//! Project scaffolding: prompt answers, the setup session and the setup pipeline.

pub mod error;
pub mod input;
pub mod pipeline;
pub mod runner;
pub mod session;

pub use error::{CommandError, SetupError, ValidationError};
pub use input::ProjectAnswers;
pub use pipeline::{DevServerHint, EnvFileStatus, ProjectSetup, SetupReport};
pub use runner::{CommandRunner, SystemRunner};
pub use session::SetupSession;
