use std::collections::HashMap;

use crate::error::{Error, Result};

/// Optimal renormalization (component F): distributes `M = 2^p` slots among
/// raw (non-normalized) symbol counts to minimize expected coded length,
/// rather than [`crate::stats::Statistics::rescale`]'s cheaper proportional
/// rounding plus steal-from-donor repair.
///
/// Every originally non-zero symbol is still guaranteed at least one slot.
/// Cost is `sum(raw[i] * -log2(f[i] / M))` over the final frequencies `f`;
/// finding the minimizing allocation is a classic "distribute K identical
/// items to minimize a separable convex cost" problem, solved here by
/// memoized search outward from the proportional estimate at each recursion
/// level instead of an O(slots) scan.
pub fn optimal_renormalize(raw: &[u64], p: u32) -> Result<Vec<u32>> {
    if p == 0 || p > 16 {
        return Err(Error::InvalidDescriptor {
            reason: format!("p must be in 1..=16, got {p}"),
        });
    }
    let m = 1u32 << p;

    let nonzero: Vec<(usize, u64)> = raw
        .iter()
        .enumerate()
        .filter(|&(_, &f)| f > 0)
        .map(|(i, &f)| (i, f))
        .collect();
    let k = nonzero.len();

    if k == 0 {
        return Err(Error::EmptyInput);
    }
    if (m as usize) < k {
        return Err(Error::ModelCapacity {
            log2_m: p,
            symbols: k,
        });
    }

    let log2_table = neg_log2_table(m);
    let total_raw: u64 = nonzero.iter().map(|&(_, f)| f).sum();

    let mut memo: HashMap<(usize, u32), (f64, u32)> = HashMap::new();
    let counts: Vec<u64> = nonzero.iter().map(|&(_, f)| f).collect();

    let chosen = solve(&counts, m, &log2_table, total_raw, &mut memo);

    let mut out = vec![0u32; raw.len()];
    for (&(idx, _), &slots) in nonzero.iter().zip(chosen.iter()) {
        out[idx] = slots;
    }
    Ok(out)
}

/// `-log2(k/m)` for `k` in `1..=m`, precomputed once per call.
fn neg_log2_table(m: u32) -> Vec<f64> {
    let mf = m as f64;
    (0..=m).map(|k| if k == 0 { f64::INFINITY } else { -(k as f64 / mf).log2() }).collect()
}

/// Returns the optimal per-symbol slot counts for `counts[0..counts.len())`,
/// summing to `m`, every entry `>= 1`.
fn solve(
    counts: &[u64],
    m: u32,
    log2_table: &[f64],
    total_raw: u64,
    memo: &mut HashMap<(usize, u32), (f64, u32)>,
) -> Vec<u32> {
    let n = counts.len();
    let (_, _) = best_cost(counts, n, m, log2_table, total_raw, memo);

    let mut slots = vec![0u32; n];
    let mut remaining = m;
    for i in (0..n).rev() {
        let (_, k) = memo[&(i + 1, remaining)];
        slots[i] = k;
        remaining -= k;
    }
    slots
}

/// `cost(i, slots)`: optimal cost of distributing `slots` among
/// `counts[0..i)`, memoized, also recording the chosen `k` for `counts[i-1]`.
///
/// `i == 1` is the base case, not `i == 0`: with a single symbol left, every
/// remaining slot must go to it, so there is exactly one feasible allocation
/// and no search is needed. Rooting the recursion at `i == 0` instead (one
/// feasible point out of an otherwise-infeasible range, reachable only via a
/// search that starts from an unrelated proportional estimate) made the
/// hill-climb below unable to tell "no improvement yet" from "no feasible
/// neighbor exists", since both look like two `+inf` costs compared to each
/// other.
fn best_cost(
    counts: &[u64],
    i: usize,
    slots: u32,
    log2_table: &[f64],
    total_raw: u64,
    memo: &mut HashMap<(usize, u32), (f64, u32)>,
) -> (f64, u32) {
    if let Some(&v) = memo.get(&(i, slots)) {
        return v;
    }
    if i == 1 {
        let raw = counts[0];
        let result = (raw as f64 * log2_table[slots as usize], slots);
        memo.insert((i, slots), result);
        return result;
    }

    let raw = counts[i - 1];
    let min_k = 1u32;
    // the remaining i-1 symbols each need >=1 slot.
    let max_k = slots - (i as u32 - 1);

    let estimate = (((slots as u64 * raw) / total_raw.max(1)) as u32).clamp(min_k, max_k);

    let cost_at = |k: u32, memo: &mut HashMap<(usize, u32), (f64, u32)>| -> f64 {
        let (rest, _) = best_cost(counts, i - 1, slots - k, log2_table, total_raw, memo);
        raw as f64 * log2_table[k as usize] + rest
    };

    let mut best_k = estimate;
    let mut best = cost_at(estimate, memo);

    // walk downward while decreasing
    let mut k = estimate;
    while k > min_k {
        let candidate = cost_at(k - 1, memo);
        if candidate < best {
            best = candidate;
            best_k = k - 1;
            k -= 1;
        } else {
            break;
        }
    }

    // walk upward while decreasing (only relevant if the downward walk didn't move)
    if best_k == estimate {
        let mut k = estimate;
        while k < max_k {
            let candidate = cost_at(k + 1, memo);
            if candidate < best {
                best = candidate;
                best_k = k + 1;
                k += 1;
            } else {
                break;
            }
        }
    }

    memo.insert((i, slots), (best, best_k));
    (best, best_k)
}
