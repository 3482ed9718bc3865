// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use stats_scrape::{
    config::options::{AppOptions, VersusNaming},
    merge,
    specs::{players, teams},
};

fn squad_rows(teams: usize, prefix: &str) -> String {
    let mut squads = String::new();
    for t in 0..teams {
        squads.push_str(&format!(
            "<tr data-row=\"{t}\"><th data-stat=\"team\"><a href=\"/t/{t}\">{prefix}Team {t}</a></th>\
             <td data-stat=\"poss\">{},5</td><td data-stat=\"games\">34</td></tr>",
            40 + t % 20
        ));
    }
    squads
}

// Squad table and its vs counterpart.
fn squads_page(teams: usize) -> String {
    format!(
        "<html><body><table><tbody>{}</tbody></table>\
         <table><tbody>{}</tbody></table></body></html>",
        squad_rows(teams, ""),
        squad_rows(teams, "vs ")
    )
}

// Stat page for the player tables: squad table first, player table second.
fn players_page(players: usize, teams: usize) -> String {
    let squads = squad_rows(teams, "");
    let mut rows = String::new();
    for i in 0..players {
        rows.push_str(&format!(
            "<tr data-row=\"{i}\"><th data-stat=\"ranker\">{i}</th>\
             <td data-stat=\"player\"><a href=\"/p/{i}\">Player {i}</a></td>\
             <td data-stat=\"nationality\"><a href=\"/c\">br BRA</a></td>\
             <td data-stat=\"position\">MF</td><td data-stat=\"team\"><a href=\"/t\">Team {}</a></td>\
             <td data-stat=\"comp_level\">eng Premier League</td>\
             <td data-stat=\"age\">24-100</td><td data-stat=\"birth_year\">2000</td>\
             <td data-stat=\"minutes_90s\">{},{}</td>\
             <td data-stat=\"minutes\">1.{:03}</td><td data-stat=\"goals\">{}</td>\
             <td data-stat=\"xg\">{},{}</td></tr>",
            i % teams.max(1), i % 38, i % 10, i % 1000, i % 7, i % 5, i % 10
        ));
        if i % 25 == 24 {
            rows.push_str("<tr class=\"thead\"><th>Rk</th><th>Player</th></tr>");
        }
    }
    format!(
        "<html><body><table><tbody>{squads}</tbody></table>\
         <table><tbody>{rows}</tbody></table></body></html>"
    )
}

fn bench_extract(c: &mut Criterion) {
    let doc = players_page(2500, 96);
    let squads = squads_page(96);

    c.bench_function("players_extract", |b| {
        b.iter(|| {
            let ds = players::extract(black_box(&doc), "shooting").unwrap();
            black_box(ds.len())
        })
    });

    c.bench_function("teams_extract", |b| {
        b.iter(|| {
            let t = teams::extract(black_box(&squads), "standard", VersusNaming::PerRow).unwrap();
            black_box(t.teams.len() + t.versus.len())
        })
    });

    let keys = AppOptions::default().merge.keys;
    let left = players::extract(&doc, "shooting").unwrap().to_table();
    let right = players::extract(&doc, "passing").unwrap().to_table();
    c.bench_function("outer_join", |b| {
        b.iter(|| {
            let out = merge::outer_join(black_box(&left), black_box(&right), &keys, "passing").unwrap();
            black_box(out.len())
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
