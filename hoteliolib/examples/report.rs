use hoteliolib::{formats::json::Json, netting, traits::ReadFormat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: набор данных JSON на stdin -> балансы на stdout
    let ds = Json::read(std::io::BufReader::new(std::io::stdin()))?;
    let balances = netting::compute_balances(&ds.transfers)?;
    serde_json::to_writer_pretty(std::io::stdout(), &balances)?;
    Ok(())
}
