use nhl_core::{NhlApi, ScheduleQuery, TeamsQuery};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let api = NhlApi::new()?;

    println!("Fetching teams...\n");
    let teams = api.teams(&TeamsQuery::new().roster(true)).await?;
    println!("Found {} teams:", teams.len());
    for team in &teams {
        println!(
            "  {:>3} {} ({})",
            team.id.unwrap_or_default(),
            team.name.as_deref().unwrap_or("?"),
            team.abbreviation.as_deref().unwrap_or("?")
        );
    }

    let game_id = std::env::args()
        .nth(1)
        .map(|id| id.parse::<u64>())
        .transpose()?
        .unwrap_or(2017020001);

    println!("\nLive feed of game {game_id}:\n");
    let game = api.game(game_id).await?;
    println!(
        "  {} @ {} [{}]",
        game.away.as_ref().and_then(|t| t.name.as_deref()).unwrap_or("?"),
        game.home.as_ref().and_then(|t| t.name.as_deref()).unwrap_or("?"),
        game.detailed_state.as_deref().unwrap_or("unknown state")
    );

    let goals = api.plays(game_id, true, false).await?;
    println!("\nGoals ({}):", goals.len());
    for goal in &goals {
        println!(
            "  P{} {} {}",
            goal.period.unwrap_or_default(),
            goal.period_time.as_deref().unwrap_or("--:--"),
            goal.description.as_deref().unwrap_or("")
        );
    }

    let boxscore = api.boxscore(game_id).await?;
    println!(
        "\nScratches: away {}, home {}",
        boxscore.away_scratches.map_or(0, |s| s.len()),
        boxscore.home_scratches.map_or(0, |s| s.len())
    );

    let dates = api.schedule(&ScheduleQuery::new().team(1)).await?;
    println!("\nToday's schedule for team 1: {} date(s)", dates.len());
    for date in &dates {
        let games = date.games.as_deref().unwrap_or_default();
        println!("  {} - {} game(s)", date.date.as_deref().unwrap_or("?"), games.len());
    }

    Ok(())
}
