//! Studio Session Demo
//!
//! Walks one player through a full session against an in-memory store:
//! take an order, click it down, go shopping, hire the team, come back
//! after a night offline, and read the audit report at the end.

use chrono::{Duration, Utc};
use clickwork_audit::Auditor;
use clickwork_core::{Catalog, ClickOutcome, DailyOutcome, PlayerId};
use clickwork_db::{GameSession, GameStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Clickwork Studio Session ===\n");

    let store = GameStore::in_memory()?;
    let session = GameSession::new(store, Catalog::builtin());
    let player_id = PlayerId::new(1001);
    let mut now = Utc::now();

    let player = session.get_or_create_player(player_id, "Nova", now)?;
    println!(
        "Created {} with {} starting balance at level {}\n",
        player.name, player.balance, player.level
    );

    // Take the starter order and click it through.
    let assigned = session.assign_order(player_id, &"business_card".into(), now)?;
    println!("Took order 'business_card': {:?}", assigned.outcome);

    let mut clicks = 0;
    loop {
        now += Duration::seconds(1);
        clicks += 1;
        match session.apply_click(player_id, now)?.outcome {
            ClickOutcome::Completed { reward, xp_gained, .. } => {
                println!(
                    "Completed after {} clicks: reward {}, xp {}\n",
                    clicks, reward, xp_gained
                );
                break;
            }
            ClickOutcome::Progressed { progress, required, notify } if notify => {
                println!("  progress {}/{}", progress, required);
            }
            _ => {}
        }
    }

    // Spend the proceeds: a boost, a laptop, and a junior designer.
    let boost = session.purchase_boost(player_id, &"click_plus_one".into(), now)?;
    println!("Bought boost: {:?}", boost.outcome);
    let item = session.purchase_item(player_id, &"phone_t1".into(), now)?;
    println!("Bought item: {:?}", item.outcome);
    session.equip_item(player_id, &"phone_t1".into(), now)?;
    let hire = session.upgrade_team_member(player_id, &"junior".into(), now)?;
    println!("Hired team member: {:?}", hire.outcome);

    let daily = session.claim_daily_bonus(player_id, now)?;
    if let DailyOutcome::Granted { amount } = daily.outcome {
        println!("Claimed daily bonus: {}\n", amount);
    }

    // A night away; the junior keeps earning, capped at the offline window.
    println!("Sleeping for 9 hours...");
    now += Duration::hours(9);
    let player = session.get_or_create_player(player_id, "Nova", now)?;
    println!("Back online with balance {}\n", player.balance);

    for code in session.take_unnotified_achievements(player_id)? {
        let name = session
            .catalog()
            .achievement(&code)
            .map(|a| a.name.as_str())
            .unwrap_or(code.as_str());
        println!("Achievement unlocked: {}", name);
    }

    let entries = session.logs_for_player(player_id)?;
    println!("\n{}", Auditor::new(&entries).report());

    Ok(())
}
