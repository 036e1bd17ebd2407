//! Human-readable dumps of the intermediate stages of `build`.

use comfy_table::{presets, Table};
use quill_core::config::BackendConfig;
use quill_core::error::QuillErrorExt;
use quill_core::lower::lower_program;
use quill_core::registry::AtomId;
use quill_core::{Program, Session};

use crate::CliError;

pub fn atoms_table(atoms: &[(String, AtomId)]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["Atom", "Id"]);
    for (name, id) in atoms {
        table.add_row(vec![name.clone(), id.to_string()]);
    }
    table
}

/// Render one stage: `ir` (the program as read), `lowered` (the target
/// unit) or `atoms` (the atom table after lowering).
pub fn dump_stage(
    stage: &str,
    program: &Program,
    session: &mut Session,
    config: &BackendConfig,
) -> Result<String, Box<dyn QuillErrorExt>> {
    match stage {
        "ir" => Ok(format!("{}\n", program.to_json_pretty())),
        "lowered" => {
            let unit = lower_program(program, session, config).map_err(|e| Box::new(e) as Box<dyn QuillErrorExt>)?;
            Ok(unit.to_string())
        }
        "atoms" => {
            let unit = lower_program(program, session, config).map_err(|e| Box::new(e) as Box<dyn QuillErrorExt>)?;
            Ok(format!("{}\n", atoms_table(&unit.atoms)))
        }
        other => Err(CliError::new(format!("unknown dump stage `{}`", other))),
    }
}
