use color_eyre::Result;

/// Run the interpreter.
fn main() -> Result<()> {
    rmonkey_lib::run_interpreter()
}
