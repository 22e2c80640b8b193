use criterion::{criterion_group, criterion_main, Criterion};
use tinyrand::{Rand, StdRand};

use passnet_soccer::event::{Event, EventType};
use passnet_soccer::network::build;

const TEAM: &str = "Leverkusen";

fn random_events(rand: &mut impl Rand, players: u64, passes: usize, substitution: Option<u16>) -> Vec<Event> {
    let names: Vec<_> = (0..players).map(|player| format!("Player {player}")).collect();
    let mut events: Vec<_> = (0..passes)
        .map(|index| {
            let actor = &names[(rand.next_u64() % players) as usize];
            let recipient = &names[(rand.next_u64() % players) as usize];
            let x = (rand.next_u64() % 120) as f64;
            let y = (rand.next_u64() % 80) as f64;
            let minute = (index * 95 / passes) as u16;
            let event = Event::new(index.to_string(), minute, TEAM, EventType::Pass)
                .with_player(actor.as_str())
                .with_location(x, y);
            if rand.next_u64() % 5 == 0 {
                event.with_outcome("Incomplete")
            } else {
                event.with_recipient(recipient.as_str())
            }
        })
        .collect();
    if let Some(minute) = substitution {
        events.push(
            Event::new("sub", minute, TEAM, EventType::Substitution).with_player("Player 0"),
        );
    }
    events
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut rand = StdRand::default();

    // sanity check
    let events = random_events(&mut rand, 11, 500, Some(60));
    let network = build(&events, 45).unwrap().into_network().unwrap();
    assert!(network.nodes().len() <= 11);
    assert!(!network.edges().is_empty());

    c.bench_function("cri_build_11_players_500_passes", |b| {
        let events = random_events(&mut rand, 11, 500, Some(60));
        b.iter(|| build(&events, 45));
    });

    c.bench_function("cri_build_14_players_2000_passes", |b| {
        let events = random_events(&mut rand, 14, 2_000, None);
        b.iter(|| build(&events, 45));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
