use clap::{Parser, ValueEnum};
use hoteliolib::{
    alloc::{self, DEFAULT_TOLERANCE},
    error::{HotelioError, Result},
    formats::{
        csv::{AssignmentsCsv, TransfersCsv},
        json::Json,
    },
    model::Dataset,
    netting,
    storage::JsonStore,
    traits::{AssignmentFilter, ReadFormat, Store, WriteFormat},
};
use std::fs::File;
use std::io::{self, BufReader, Write};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Json,
    CsvTransfers,
    CsvAssignments,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Op {
    /// Перекодировать набор данных из одного формата в другой
    Convert,
    /// Найти группы назначений с неверным делением ставки
    CheckRates,
    /// Пересчитать доли и вывести исправленный набор данных
    FixRates,
    /// Свести балансы по объектам из не-void переводов
    Balances,
}

#[derive(Parser, Debug)]
#[command(name="hotelio", version, about="Бэк-офис сети отелей: ставки и переводы")]
struct Cli {
    /// Операция
    #[arg(long="op", value_enum)]
    op: Op,

    /// Входной файл (по умолчанию stdin)
    #[arg(short='i', long="input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short='o', long="output")]
    output: Option<String>,

    /// Формат входа (по умолчанию json)
    #[arg(long="in-format", value_enum)]
    in_format: Option<Fmt>,

    /// Формат выхода (по умолчанию json; отчёты — только json)
    #[arg(long="out-format", value_enum)]
    out_format: Option<Fmt>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let in_format = cli.in_format.unwrap_or(Fmt::Json);
    let out_format = cli.out_format.unwrap_or(Fmt::Json);

    // reader
    let reader: Box<dyn io::Read> = match cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let br = BufReader::new(reader);

    let ds = match in_format {
        Fmt::Json => Json::read(br),
        Fmt::CsvTransfers => TransfersCsv::read(br),
        Fmt::CsvAssignments => AssignmentsCsv::read(br),
    }?;

    // writer
    let mut writer: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    match cli.op {
        Op::Convert => write_dataset(&mut writer, out_format, &ds)?,
        Op::CheckRates => {
            require_json(out_format)?;
            let reports = alloc::scan(&ds.assignments, &ds.workers, DEFAULT_TOLERANCE)?;
            serde_json::to_writer_pretty(&mut writer, &reports)?;
        }
        Op::FixRates => {
            let mut store = JsonStore::new(ds);
            let reports = alloc::scan(
                &store.dataset().assignments,
                &store.dataset().workers,
                DEFAULT_TOLERANCE,
            )?;
            for rep in &reports {
                let worker = store.fetch_worker(&rep.worker_id)?;
                let group = store.fetch_assignments(&AssignmentFilter {
                    worker_id: Some(rep.worker_id.clone()),
                    from: Some(rep.date),
                    to: Some(rep.date),
                })?;
                let fixes = alloc::repair(&group, worker.daily_rate)?;
                for (id, err) in alloc::apply_fixes(&mut store, &fixes) {
                    eprintln!("failed to update {id}: {err}");
                }
            }
            write_dataset(&mut writer, out_format, store.dataset())?;
        }
        Op::Balances => {
            require_json(out_format)?;
            let balances = netting::compute_balances(&ds.transfers)?;
            serde_json::to_writer_pretty(&mut writer, &balances)?;
        }
    }

    writer.flush().map_err(HotelioError::from)
}

fn write_dataset(w: &mut dyn Write, fmt: Fmt, ds: &Dataset) -> Result<()> {
    match fmt {
        Fmt::Json => Json::write(&mut *w, ds),
        Fmt::CsvTransfers => TransfersCsv::write(&mut *w, ds),
        Fmt::CsvAssignments => AssignmentsCsv::write(&mut *w, ds),
    }
}

fn require_json(fmt: Fmt) -> Result<()> {
    match fmt {
        Fmt::Json => Ok(()),
        _ => Err(HotelioError::Unsupported("reports are emitted as JSON only")),
    }
}
