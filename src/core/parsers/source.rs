use std::{path::Path, sync::Arc};

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Pick the parser syntax from the file extension.
///
/// `.ts` files are parsed without JSX so that `<T>value` casts keep working;
/// everything else (`.tsx`, `.js`, `.jsx`, stdin) is parsed as TSX, which is a
/// superset of the JavaScript dialects we care about.
pub fn syntax_for(file_path: &str) -> Syntax {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    Syntax::Typescript(TsSyntax {
        tsx: !matches!(ext, "ts" | "mts" | "cts"),
        decorators: true,
        ..Default::default()
    })
}

/// Parse JS/TS source code string into an AST.
///
/// Accepts a shared SourceMap so files can be parsed on parallel threads.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let mut parser = Parser::new(syntax_for(file_path), StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e.kind()))?;

        Ok(ParsedSource { module, source_map })
    })
}
