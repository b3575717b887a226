//! Criterion benchmarks for the greedy solver at the engine's
//! destination cap.
#![expect(
    missing_docs,
    reason = "criterion_group!/criterion_main! expand to undocumented items"
)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geo::Coord;
use stopover_core::{Destination, SolveRequest, Solver};
use stopover_solver_greedy::GreedySolver;

/// Ten stops scattered over a city-sized area, in an order chosen so
/// construction leaves work for refinement.
fn capped_request() -> SolveRequest {
    let coords = [
        (28.6562, 77.2410),
        (28.5245, 77.1855),
        (28.6129, 77.2295),
        (28.5535, 77.2588),
        (28.6507, 77.2334),
        (28.5933, 77.2507),
        (28.6304, 77.2177),
        (28.5494, 77.2001),
        (28.6692, 77.2265),
        (28.5823, 77.1527),
    ];
    let destinations = coords
        .iter()
        .enumerate()
        .map(|(index, &(lat, lon))| {
            let id = index as u64 + 1;
            Destination::new(id, format!("stop {id}"), Coord { x: lon, y: lat })
        })
        .collect();
    SolveRequest {
        origin: Some(Coord {
            x: 77.2090,
            y: 28.6139,
        }),
        destinations,
    }
}

fn bench_solve_at_cap(c: &mut Criterion) {
    let solver = GreedySolver::new();
    let request = capped_request();
    c.bench_function("solve_ten_destinations", |b| {
        b.iter(|| solver.solve(black_box(&request)));
    });
}

criterion_group!(benches, bench_solve_at_cap);
criterion_main!(benches);
