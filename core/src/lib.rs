pub mod config;
pub mod emit;
pub mod error;
pub mod ir;
pub mod location;
pub mod lower;
pub mod registry;
pub mod target;
pub mod vm;

pub use config::{BackendConfig, TargetKind};
pub use error::{BackendError, BackendErrorKind, Level, QuillErrorExt};
pub use ir::{Declaration, Expr, Program, Type};
pub use location::Location;
pub use lower::{lower_declaration, lower_program};
pub use emit::emit_unit;
pub use registry::Session;
pub use target::TargetUnit;
pub use vm::VM;

pub fn generate_error_report<E: QuillErrorExt + ?Sized>(error: &E) -> String {
    let level = error.level();
    let location = match error.location() {
        Some(loc) => loc.to_string(),
        None => "unknown location".to_string(),
    };
    let message = error.message();

    format!("QUILL | {} | {} | {} | {}", level, location, error.issuer(), message)
}

/// Lower and render `program` in a fresh session.
pub fn compile_program(program: &Program, config: &BackendConfig) -> Result<String, BackendError> {
    let mut session = Session::new();
    compile_with_session(program, config, &mut session)
}

/// Lower and render `program` against a caller-provided session, e.g. one
/// with pipeline entries already registered. The session is left holding
/// the unit's registries so callers can inspect them afterwards.
pub fn compile_with_session(
    program: &Program,
    config: &BackendConfig,
    session: &mut Session,
) -> Result<String, BackendError> {
    let unit = lower_program(program, session, config)?;
    emit_unit(&unit, config)
}
