use clap::{App,Arg};
use qlog_tools::{helpers,Aggregator,OutputFormat,QlogError};
use std::io::{stdout,Write};
use std::path::Path;
use tracing::info;

/**
 * Reads a Quake 3 Arena server log and prints kill statistics for every finished game.
 */
fn main() {
    let input_args = App::new("qlog-summary")
        .version( &qlog_tools::version()[..] )
        .author("Joshua Vander Hook <josh@vanderhook.info>")
        .about(
            &
                (qlog_tools::about()
                +"\n This tool prints per-game kills, player scores and kills by means of death. To see the raw events, see qlog-events"
                ) [..]
            )
        .arg(Arg::with_name("input")
        .required(true)
        .help("The server log to read, e.g., games.log")
        )
        .arg(Arg::with_name("out_format")
        .required(false)
        .short("o")
        .default_value("yaml")
        .possible_values(OutputFormat::NAMES)
        .help("Output format: indented yaml-like blocks, or one kvc line per game.")
        )
        .arg(Arg::with_name("sorted")
        .short("s")
        .long("sorted")
        .help("Sort players and means of death by name instead of printing them in hash order.")
        )
        .arg(Arg::with_name("verbose")
        .short("v")
        .multiple(true)
        .help("More diagnostics on stderr. Overridden by QLOG_LOG.")
        )
        .get_matches();

    helpers::init_logging(input_args.occurrences_of("verbose"));

    //clap enforces these two
    let input = input_args.value_of("input").unwrap_or_default();
    let format = input_args.value_of("out_format").unwrap_or("yaml");
    let sorted = input_args.is_present("sorted");

    if let Err(err) = run(Path::new(input), format, sorted) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(input: &Path, format: &str, sorted: bool) -> Result<(), QlogError> {
    let format: OutputFormat = format.parse()?;
    let mut source = helpers::open_log(input)?;
    info!(path = %input.display(), "reading log");

    let sout = stdout();
    let mut out = sout.lock();
    let mut agg = Aggregator::new();
    //the scanner can't fail, so the first write error is kept and reported after
    let mut result = Ok(());
    qlog_tools::scan(&mut source, |event| {
        if let Some(game) = agg.on_event(&event) {
            if result.is_ok() {
                result = qlog_tools::write_summary(&mut out, &game, format, sorted);
            }
        }
    });
    result?;
    out.flush()?;

    if let Some(e) = source.take_error() {
        return Err(QlogError::Read(e));
    }
    info!(games = agg.games_finished(), "done");
    Ok(())
}
