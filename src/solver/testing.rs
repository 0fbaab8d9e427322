//! Domain generators shared by solver tests.

use crate::models::{Category, Day, Domain, Worker, DAYS_PER_WEEK};

/// A domain with a planted roster: worker `(c + d) % n` covers
/// category `c` on day `d`, plus extra pool members taken from `extras`.
///
/// Quotas are the planted counts plus `quota_slack`. No category allows
/// vacancies, so every solution must fill every slot.
pub(crate) fn planted_domain(
    categories: usize,
    workers: usize,
    extras: &[Vec<usize>],
    quota_slack: u8,
) -> Domain {
    let names: Vec<String> = (0..workers).map(|w| format!("w{w}")).collect();
    let mut spec = Domain::builder();
    let mut quotas = vec![vec![0i32; categories]; workers];
    let mut pools = vec![vec![Vec::new(); DAYS_PER_WEEK]; categories];

    for c in 0..categories {
        for d in 0..DAYS_PER_WEEK {
            let planted = (c + d) % workers;
            quotas[planted][c] += 1;
            pools[c][d].push(names[planted].clone());
            for &extra in &extras[(c * DAYS_PER_WEEK + d) % extras.len()] {
                let extra = extra % workers;
                if !pools[c][d].contains(&names[extra]) {
                    pools[c][d].push(names[extra].clone());
                }
            }
        }
    }

    for (w, name) in names.iter().enumerate() {
        let mut worker = Worker::new(name.clone());
        for c in 0..categories {
            worker = worker.with_quota(format!("c{c}"), quotas[w][c] + quota_slack as i32);
        }
        spec = spec.worker(worker);
    }
    for (c, day_pools) in pools.into_iter().enumerate() {
        let mut category = Category::new(format!("c{c}"));
        for (d, mut pool) in day_pools.into_iter().enumerate() {
            // Planted worker last, so the search has to work for it
            pool.rotate_left(1);
            category = category.with_day_pool(Day::ALL[d], pool);
        }
        spec = spec.category(category);
    }
    spec.build().unwrap()
}

/// One worker, one category needing two of them a day.
pub(crate) fn lone_worker_headcount_two() -> Domain {
    Domain::builder()
        .worker(Worker::new("Ana"))
        .category(Category::new("Fire").with_pool(["Ana"]).with_headcount(2))
        .build()
        .unwrap()
}

/// One worker whose quota covers two of the seven days.
pub(crate) fn lone_worker_short_quota() -> Domain {
    Domain::builder()
        .worker(Worker::new("Ana").with_quota("Fire", 2))
        .category(Category::new("Fire").with_pool(["Ana"]))
        .build()
        .unwrap()
}
