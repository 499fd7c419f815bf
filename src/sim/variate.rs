//! 随机变量生成
//!
//! 所有到达/服务时间都来自一个 [0,1) 均匀源。均匀源可以是带种子的 ChaCha8，
//! 也可以是测试时注入的固定序列。

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;
use std::fmt;

/// 均匀分布源：返回 [0,1) 内的值。
pub trait UniformSource: Send + fmt::Debug {
    fn next_uniform(&mut self) -> f64;
}

/// 带种子的 ChaCha8 均匀源
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for SeededSource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// 注入的固定均匀序列；用完后从头循环。
#[derive(Debug, Clone)]
pub struct FixedDraws {
    draws: Vec<f64>,
    idx: usize,
}

impl FixedDraws {
    /// `draws` 必须非空，且每个值都在 [0,1) 内。
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "fixed draw sequence must not be empty");
        assert!(
            draws.iter().all(|u| (0.0..1.0).contains(u)),
            "fixed draws must lie in [0, 1)"
        );
        Self { draws, idx: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.idx
    }
}

impl UniformSource for FixedDraws {
    fn next_uniform(&mut self) -> f64 {
        let u = self.draws[self.idx % self.draws.len()];
        self.idx = self.idx.wrapping_add(1);
        u
    }
}

/// 在均匀源之上生成各类分布的变量。
#[derive(Debug)]
pub struct Variates {
    source: Box<dyn UniformSource>,
}

impl Variates {
    pub fn new(source: impl UniformSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededSource::new(seed))
    }

    pub fn uniform01(&mut self) -> f64 {
        self.source.next_uniform()
    }

    /// 指数分布：`-ln(1-u)/rate`。`rate` 必须为正。
    pub fn exponential(&mut self, rate: f64) -> f64 {
        debug_assert!(rate > 0.0, "exponential rate must be positive, got {rate}");
        let u = self.uniform01();
        -(1.0 - u).ln() / rate
    }

    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.uniform01() * (max - min)
    }

    /// Box–Muller 变换。`u1` 取 `1-u` 以避免 ln(0)。
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = 1.0 - self.uniform01();
        let u2 = self.uniform01();
        let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + z0 * std_dev
    }

    /// Knuth 算法；适用于较小的 `lambda`。
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        let limit = (-lambda).exp();
        let mut k = 0u64;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.uniform01();
            if p <= limit {
                break;
            }
        }
        k - 1
    }
}
