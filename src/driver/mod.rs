use std::fs;

use itertools::Itertools;

use crate::{
    ast::{BindingTable, FuncCall},
    errors::{ElzError, ElzErrorKind},
    parse::Parser,
    sema::Generator,
    typing::error::GenError,
};

mod build;

pub use build::BuildOptions;

#[derive(Debug, Default)]
pub struct Driver {
    pub errors_emitted: usize,
}

impl Driver {
    pub fn new() -> Driver {
        Driver { errors_emitted: 0 }
    }

    pub fn emit_errors(&mut self, errs: Vec<ElzError>) {
        for ((kind, src), group) in &errs.into_iter().group_by(|err| (err.kind, err.src.clone())) {
            let msg = group.map(|err| err.msg).collect::<Vec<_>>().join("\n");
            let err = ElzError { msg, src, kind };
            err.emit();
            self.errors_emitted += 1;
        }
    }

    pub fn build(&self, options: BuildOptions) -> Result<(), Vec<ElzError>> {
        let filepath = options.input_path.display().to_string();
        let src = fs::read_to_string(&options.input_path).map_err(|err| {
            vec![ElzError::new(
                ElzErrorKind::IO,
                format!("cannot read {}: {}", filepath, err),
                vec![],
            )]
        })?;

        let output = self.build_source(&src, &filepath, &options)?;
        match &options.output_path {
            Some(path) => {
                log::info!("writing to {}", path.display());
                fs::write(path, output).map_err(|err| vec![err.into()])
            }
            None => {
                print!("{}", output);
                Ok(())
            }
        }
    }

    /// Parses `src`, specializes the requested calls and renders the module.
    pub fn build_source(
        &self,
        src: &str,
        filepath: &str,
        options: &BuildOptions,
    ) -> Result<String, Vec<ElzError>> {
        let bindings = Parser::parse(src, filepath)?;
        log::info!("parsed {} binding(s) from {}", bindings.len(), filepath);
        if options.print_ast {
            eprintln!("{}", bindings);
        }

        let calls = self.requested_calls(&bindings, options)?;
        let module = options
            .input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut gen = Generator::with_module(&bindings, module);
        let mut errors = vec![];
        for call in calls.iter() {
            log::info!("specializing {}", call.name);
            if let Err(err) = gen.call(call) {
                errors.push(to_driver_error(err, &bindings));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        log::debug!("{}", gen.program());
        Ok(if options.emit_lir {
            format!("{}\n", gen.program())
        } else {
            gen.render()
        })
    }

    fn requested_calls(
        &self,
        bindings: &BindingTable,
        options: &BuildOptions,
    ) -> Result<Vec<FuncCall>, Vec<ElzError>> {
        if options.calls.is_empty() {
            return Ok(bindings
                .iter()
                .filter(|b| b.params.is_empty())
                .map(|b| FuncCall {
                    name: b.name.clone(),
                    args: vec![],
                })
                .collect());
        }

        let (calls, errors): (Vec<_>, Vec<_>) = options
            .calls
            .iter()
            .enumerate()
            .map(|(i, src)| Parser::parse_call(src, &format!("<call #{}>", i + 1)))
            .partition(Result::is_ok);

        if errors.is_empty() {
            Ok(calls.into_iter().filter_map(Result::ok).collect())
        } else {
            Err(errors.into_iter().filter_map(Result::err).collect())
        }
    }
}

/// Attaches the source of the binding the error was raised in, when known.
fn to_driver_error(err: GenError, bindings: &BindingTable) -> ElzError {
    let src = err
        .binding
        .as_ref()
        .and_then(|name| bindings.get(name))
        .and_then(|b| b.src.clone());
    let mut err: ElzError = err.into();
    err.src.extend(src);
    err
}
