// ── partialsumcache.rs ─────────────────────────────────────────────────────

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// 外部持有的 p-series 部分和快取：參數失效檢查 + 查詢 + 計算並存入。
///
/// # Cache key 設計
///
/// 快取只對「目前的 p」有效；p 一換，整張表清空。
/// p 以 `f64::to_bits` 存放，避免浮點數不能當 `HashMap` key 的問題，
/// 同時 `-0.0` 與 `0.0`、不同 NaN payload 會被視為不同的 p，只是多算一次。
///
/// 快取只是效能捷徑：命中或不命中，回傳值都和直接計算相同。
pub trait PartialSumCache {
    fn get_or_compute(&self, p: f64, terms: u64, compute: impl FnOnce() -> f64) -> f64;
}

/// 同一個 p 底下最多保留的 terms 筆數；滿了就整張表清空重來。
pub const MAX_ENTRIES: usize = 1024;

// ── 單執行緒版：RefCell ──────────────────────────────────────────────────────

struct CacheInner {
    p_bits: Option<u64>,
    sums: HashMap<u64, f64>,
}

impl CacheInner {
    fn new() -> CacheInner {
        CacheInner { p_bits: None, sums: HashMap::new() }
    }

    fn invalidate_for(&mut self, p_bits: u64) {
        if self.p_bits != Some(p_bits) {
            self.sums.clear();
            self.p_bits = Some(p_bits);
        }
    }

    fn insert(&mut self, terms: u64, sum: f64) {
        if self.sums.len() >= MAX_ENTRIES && !self.sums.contains_key(&terms) {
            self.sums.clear();
        }
        self.sums.insert(terms, sum);
    }
}

pub struct RefCellCache {
    inner: RefCell<CacheInner>,
}

impl RefCellCache {
    pub fn new() -> Self {
        Self { inner: RefCell::new(CacheInner::new()) }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RefCellCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialSumCache for RefCellCache {
    fn get_or_compute(&self, p: f64, terms: u64, compute: impl FnOnce() -> f64) -> f64 {
        let mut inner = self.inner.borrow_mut();
        inner.invalidate_for(p.to_bits());
        if let Some(&sum) = inner.sums.get(&terms) {
            return sum;
        }
        let sum = compute();
        inner.insert(terms, sum);
        sum
    }
}

// ── 多執行緒版：RwLock ───────────────────────────────────────────────────────
//
// # 已知 trade-off：double-compute
//
// 讀鎖查不到之後、寫鎖寫入之前，兩條執行緒可能都各自計算一次。
// 同一 (p, terms) 的結果具確定性，重複計算只是浪費而非錯誤。
// 毒化的鎖直接取回內容：表裡只有已算完的值。

pub struct RwLockCache {
    inner: RwLock<CacheInner>,
}

impl RwLockCache {
    pub fn new() -> Self {
        Self { inner: RwLock::new(CacheInner::new()) }
    }
}

impl Default for RwLockCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialSumCache for RwLockCache {
    fn get_or_compute(&self, p: f64, terms: u64, compute: impl FnOnce() -> f64) -> f64 {
        let p_bits = p.to_bits();

        // Step 1：讀鎖查快取（p 相同才算命中）
        {
            let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if inner.p_bits == Some(p_bits) {
                if let Some(&sum) = inner.sums.get(&terms) {
                    return sum;
                }
            }
        }

        // Step 2：持鎖外計算，再以寫鎖失效檢查並寫入
        let sum = compute();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.invalidate_for(p_bits);
        inner.insert(terms, sum);
        sum
    }
}

pub type SingleThreadedCache = RefCellCache;
pub type MultiThreadedCache = RwLockCache;
