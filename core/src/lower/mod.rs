//! Lowering of IR declarations into a `TargetUnit`.
//!
//! `lower_program` seeds the atom registry, checks top-level names, lowers
//! every declaration and validates the pipeline entries. It either returns
//! a complete unit or the first error; nothing partial escapes.

pub mod lower_expr;
pub mod lowering_context;

use std::collections::HashSet;

use crate::config::BackendConfig;
use crate::error::{BackendError, BackendErrorKind};
use crate::ir::{Declaration, Expr, Program};
use crate::registry::Session;
use crate::target::{TargetFunction, TargetUnit};

pub use lower_expr::lower;
pub use lowering_context::LoweringContext;

/// Atoms seeded ahead of the program's own when `boolean_atoms` is on.
pub const BOOLEAN_ATOMS: [&str; 2] = ["FALSE", "TRUE"];

/// Lower one declaration.
///
/// The body must open with exactly as many closures as the signature has
/// curried parameters. The first one becomes the function's named
/// parameter and the rest stay as nested lambdas in return position.
pub fn lower_declaration(decl: &Declaration, ctx: &mut LoweringContext<'_>) -> Result<TargetFunction, BackendError> {
    ctx.enter_declaration(&decl.name, decl.location.clone());

    let expected = decl.arity();
    let found = decl.body.leading_closures();
    if expected != found {
        // first node where body shape and signature disagree
        return Err(ctx.error(BackendErrorKind::ArityMismatch { expected, found }, expected.min(found)));
    }

    let (param, body) = match &decl.body {
        Expr::Closure { param, body } => {
            ctx.skip_to(1);
            let mut scope = vec![param.clone()];
            let body = lower_expr::lower_expr(body, &mut scope, ctx)?;
            (Some(param.clone()), body)
        }
        other => (None, lower_expr::lower_expr(other, &mut Vec::new(), ctx)?),
    };

    log::debug!("lowered `{}` : {} (arity {})", decl.name, decl.signature, expected);
    Ok(TargetFunction {
        name: decl.name.clone(),
        signature: decl.signature.clone(),
        param,
        body,
    })
}

/// Lower a whole program against `session`.
///
/// Pipeline entries already registered in the session must name
/// declarations of the program.
pub fn lower_program(program: &Program, session: &mut Session, config: &BackendConfig) -> Result<TargetUnit, BackendError> {
    if config.boolean_atoms {
        for name in BOOLEAN_ATOMS {
            session.atoms_mut().register(name);
        }
    }
    for name in &program.atoms {
        session.atoms_mut().register(name);
    }

    let mut globals = HashSet::new();
    for decl in &program.declarations {
        if !globals.insert(decl.name.clone()) {
            return Err(BackendError::new(BackendErrorKind::DuplicateDeclaration(decl.name.clone()), decl.name.clone())
                .with_location(decl.location.clone()));
        }
    }

    let mut functions = Vec::with_capacity(program.declarations.len());
    {
        let mut ctx = LoweringContext::new(session.atoms_mut(), &globals, config.implicit_atoms);
        for decl in &program.declarations {
            functions.push(lower_declaration(decl, &mut ctx)?);
        }
    }

    for entry in session.pipelines().entries() {
        if !globals.contains(entry) {
            return Err(BackendError::new(
                BackendErrorKind::UnknownPipelineStage(entry.clone()),
                config.pipeline_binding.clone(),
            ));
        }
    }

    log::info!(
        "lowered {} declaration(s), {} atom(s), {} pipeline entr(ies)",
        functions.len(),
        session.atoms().len(),
        session.pipelines().len()
    );
    Ok(TargetUnit {
        functions,
        atoms: session.atoms().emit_all(),
        pipelines: session.pipelines().entries().to_vec(),
    })
}
