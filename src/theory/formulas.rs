//! 闭式公式
//!
//! 状态概率的未归一化项用递推计算（`t_n = t_{n-1} · ratio`），不直接求阶乘和幂；
//! 项超过 `RESCALE_AT` 时整体缩放，ρ > 1 且容量很大或总体很大时也不会溢出。

use super::TheoreticalMetrics;

/// 未归一化项的缩放阈值
const RESCALE_AT: f64 = 1e250;

/// M/M/1；ρ ≥ 1 时不稳定。
pub fn mm1(lambda: f64, mu: f64) -> Option<TheoreticalMetrics> {
    let rho = lambda / mu;
    if rho >= 1.0 {
        return None;
    }
    Some(TheoreticalMetrics {
        rho,
        l: rho / (1.0 - rho),
        lq: rho * rho / (1.0 - rho),
        w: 1.0 / (mu - lambda),
        wq: rho / (mu - lambda),
        p0: 1.0 - rho,
        lambda_eff: Some(lambda),
        p_wait: Some(rho),
        p_block: None,
    })
}

/// M/M/s（Erlang C）；λ ≥ sμ 时不稳定。
pub fn multi_server(lambda: f64, mu: f64, servers: usize) -> Option<TheoreticalMetrics> {
    if servers == 0 {
        return None;
    }
    let s = servers as f64;
    let a = lambda / mu;
    let rho = lambda / (s * mu);
    if rho >= 1.0 {
        return None;
    }

    // Σ_{n<s} a^n/n!，循环结束时 term = a^s/s!
    let mut sum = 0.0;
    let mut term = 1.0;
    for n in 0..servers {
        sum += term;
        term *= a / (n + 1) as f64;
    }
    let tail = term / (1.0 - rho);
    let p0 = 1.0 / (sum + tail);
    let c = tail * p0;

    let lq = c * rho / (1.0 - rho);
    let wq = c / (s * mu - lambda);
    Some(TheoreticalMetrics {
        rho,
        l: a + lq,
        lq,
        w: wq + 1.0 / mu,
        wq,
        p0,
        lambda_eff: Some(lambda),
        p_wait: Some(c),
        p_block: None,
    })
}

/// M/M/s/K（s = 1 时即 M/M/1/K）。总是稳定。
pub fn finite_capacity(
    lambda: f64,
    mu: f64,
    servers: usize,
    capacity: usize,
) -> Option<TheoreticalMetrics> {
    if servers == 0 || capacity < servers {
        return None;
    }
    let a = lambda / mu;
    let probs = normalized(capacity, |n| a / n.min(servers) as f64);
    let p0 = probs[0];
    let p_block = probs[capacity];
    let lambda_eff = lambda * (1.0 - p_block);
    let lq: f64 = probs
        .iter()
        .enumerate()
        .skip(servers + 1)
        .map(|(n, p)| (n - servers) as f64 * p)
        .sum();
    let l = lq + lambda_eff / mu;
    let wq = if lambda_eff > 0.0 { lq / lambda_eff } else { 0.0 };
    Some(TheoreticalMetrics {
        rho: lambda / (servers as f64 * mu),
        l,
        lq,
        w: wq + 1.0 / mu,
        wq,
        p0,
        lambda_eff: Some(lambda_eff),
        p_wait: None,
        p_block: Some(p_block),
    })
}

/// M/M/s/N 有限源。总是稳定。
pub fn finite_source(
    lambda: f64,
    mu: f64,
    servers: usize,
    population: usize,
) -> Option<TheoreticalMetrics> {
    if servers == 0 || population == 0 {
        return None;
    }
    let a = lambda / mu;
    let probs = normalized(population, |n| {
        (population - n + 1) as f64 * a / n.min(servers) as f64
    });

    let mut l = 0.0;
    let mut lq = 0.0;
    for (n, p) in probs.iter().enumerate() {
        l += n as f64 * p;
        if n > servers {
            lq += (n - servers) as f64 * p;
        }
    }
    let lambda_eff = lambda * (population as f64 - l);
    let (w, wq) = if lambda_eff > 0.0 {
        (l / lambda_eff, lq / lambda_eff)
    } else {
        (0.0, 0.0)
    };
    Some(TheoreticalMetrics {
        rho: population as f64 * lambda / (servers as f64 * mu),
        l,
        lq,
        w,
        wq,
        p0: probs[0],
        lambda_eff: Some(lambda_eff),
        p_wait: None,
        p_block: None,
    })
}

/// 状态 0..=max 的归一化概率，`ratio(n) = t_n / t_{n-1}`。
///
/// 只有相对大小有意义，所以 `t` 超过阈值时把已有各项一起除以 `t`；
/// 早期的项可能因此下溢为 0，它们相对总和本来就可以忽略。
fn normalized(max: usize, ratio: impl Fn(usize) -> f64) -> Vec<f64> {
    let mut terms = Vec::with_capacity(max + 1);
    let mut t = 1.0;
    terms.push(t);
    for n in 1..=max {
        t *= ratio(n);
        if t > RESCALE_AT {
            terms.iter_mut().for_each(|p| *p /= t);
            t = 1.0;
        }
        terms.push(t);
    }
    let total: f64 = terms.iter().sum();
    terms.iter_mut().for_each(|p| *p /= total);
    terms
}
