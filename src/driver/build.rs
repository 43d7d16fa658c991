use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, Default, StructOpt)]
pub struct BuildOptions {
    #[structopt(
        name = "INPUT",
        help = "file containing the bindings to compile",
        parse(from_os_str)
    )]
    pub input_path: PathBuf,

    #[structopt(
        long = "call",
        short = "c",
        help = "Call expression to specialize, e.g. `add(1, 2)`",
        long_help = "May be given more than once. If omitted, every binding without parameters is specialized.",
        number_of_values = 1
    )]
    pub calls: Vec<String>,

    #[structopt(long = "output", short = "o", help = "Output path", parse(from_os_str))]
    pub output_path: Option<PathBuf>,

    #[structopt(long, help = "Emit LIR instead of LLVM IR")]
    pub emit_lir: bool,

    #[structopt(long, help = "Print the AST after parsing")]
    pub print_ast: bool,
}
