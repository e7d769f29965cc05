use sqlrender::config::{load_config, Config, SqliteConfig};
use sqlrender::display::{
    display_formatted_list, display_list, display_result_sets, display_tables_csv,
};
use sqlrender::people::{self, PERSON_TABLE, SAMPLE_PEOPLE};
use sqlrender::render::render_csv;
use sqlrender::{QuerySource, RenderOptions, Result, SchemaIntrospector, SqliteSource};
use tracing::{error, info, Level};

const USAGE: &str = "usage: sqlrender [DATABASE_PATH] [CONFIG_PATH]";

const AGE_SUMMARY_SQL: &str = "
    SELECT COUNT(*) AS People FROM Person;
    SELECT MIN(Age) AS Youngest, MAX(Age) AS Oldest FROM Person;
";

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return;
    }

    let config = match args.get(2) {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        },
        None => Config::default(),
    };

    // Logs go to stderr so rendered tables own stdout
    let level = if config.render.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut sqlite = config.sqlite.clone();
    if let Some(path) = args.get(1) {
        sqlite.path = path.clone();
    }

    if let Err(e) = run(&sqlite, config.render.options()) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(sqlite: &SqliteConfig, opts: RenderOptions) -> Result<()> {
    info!("opening {}", sqlite.path);
    let source = SqliteSource::open(sqlite)?;
    let conn = source.connection();

    people::ensure_person_table(conn)?;
    for person in &SAMPLE_PEOPLE {
        people::upsert_person(conn, person)?;
    }
    people::delete_person(conn, "Bunny", "Bugs")?;

    let introspector = SchemaIntrospector::new(&source, opts);
    recover("list tables", display_tables_csv(&introspector))?;

    recover("describe table", {
        introspector
            .table_schema_csv(PERSON_TABLE)
            .and_then(|schema| {
                display_list(&schema)?;
                display_formatted_list(&schema, &opts)
            })
    })?;

    recover("select people", {
        source
            .query("SELECT * FROM Person")
            .and_then(|result| {
                let lines = render_csv(&result);
                display_list(&lines)?;
                display_formatted_list(&lines, &opts)
            })
    })?;

    recover("age summary", display_result_sets(&source, AGE_SUMMARY_SQL, &opts))?;

    Ok(())
}

/// Logs a failed listing and moves on, unless the failure is fatal.
fn recover(operation: &str, outcome: Result<()>) -> Result<()> {
    match outcome {
        Err(e) if !e.is_fatal() => {
            error!(operation, "{}", e);
            Ok(())
        }
        other => other,
    }
}
