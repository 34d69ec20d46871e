use clap::{App,Arg};
use qlog_tools::{helpers,QlogError};
use std::io::{stdout,Write};
use std::path::Path;

/**
 * Dumps every event the scanner recognizes, one `<name>\t<payload>` per line.
 */
fn main() {
    let input_args = App::new("qlog-events")
        .version( &qlog_tools::version()[..] )
        .author("Joshua Vander Hook <josh@vanderhook.info>")
        .about(&qlog_tools::about()[..])
        .arg(Arg::with_name("input")
        .required(true)
        .help("The server log to read, e.g., games.log")
        )
        .arg(Arg::with_name("verbose")
        .short("v")
        .multiple(true)
        .help("More diagnostics on stderr. Overridden by QLOG_LOG.")
        )
        .get_matches();

    helpers::init_logging(input_args.occurrences_of("verbose"));

    let input = input_args.value_of("input").unwrap_or_default();
    if let Err(err) = run(Path::new(input)) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(input: &Path) -> Result<(), QlogError> {
    let mut source = helpers::open_log(input)?;
    let sout = stdout();
    let mut out = sout.lock();
    let mut result = Ok(());
    qlog_tools::scan(&mut source, |event| {
        if result.is_ok() {
            result = writeln!(out, "{}\t{}", event.name(), event.payload());
        }
    });
    result?;
    out.flush()?;

    if let Some(e) = source.take_error() {
        return Err(QlogError::Read(e));
    }
    Ok(())
}
