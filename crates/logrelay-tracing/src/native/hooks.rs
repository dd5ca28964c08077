use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use logrelay_core::Fields;

use super::NativeLevel;

pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// What a hook sees of an entry about to be written
#[derive(Debug, Clone, Copy)]
pub struct HookRecord<'a> {
    pub level: NativeLevel,
    pub message: &'a str,
    pub fields: &'a Fields,
}

/// Callback run for every entry at one of its levels, before the entry is written
pub trait Hook: Send + Sync {
    fn levels(&self) -> Vec<NativeLevel>;

    fn fire(&self, record: &HookRecord<'_>) -> Result<(), HookError>;
}

/// Hooks indexed by the level they fire on
#[derive(Clone, Default)]
pub struct LevelHooks {
    hooks: HashMap<NativeLevel, Vec<Arc<dyn Hook>>>,
}

impl LevelHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` under every level it reports
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        for level in hook.levels() {
            self.hooks.entry(level).or_default().push(Arc::clone(&hook));
        }
    }

    pub fn for_level(&self, level: NativeLevel) -> &[Arc<dyn Hook>] {
        self.hooks.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }

    /// Fire the hooks for `record.level` in registration order, stopping at the first failure
    pub fn fire(&self, record: &HookRecord<'_>) -> Result<(), HookError> {
        for hook in self.for_level(record.level) {
            hook.fire(record)?;
        }
        Ok(())
    }
}

impl fmt::Debug for LevelHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for level in NativeLevel::ALL {
            let count = self.for_level(level).len();
            if count > 0 {
                map.entry(&level, &count);
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHook {
        levels: Vec<NativeLevel>,
        fired: AtomicUsize,
    }

    impl Hook for CountingHook {
        fn levels(&self) -> Vec<NativeLevel> {
            self.levels.clone()
        }

        fn fire(&self, _record: &HookRecord<'_>) -> Result<(), HookError> {
            self.fired.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHook;

    impl Hook for FailingHook {
        fn levels(&self) -> Vec<NativeLevel> {
            vec![NativeLevel::Error]
        }

        fn fire(&self, _record: &HookRecord<'_>) -> Result<(), HookError> {
            Err("sink unavailable".into())
        }
    }

    fn record(level: NativeLevel, fields: &Fields) -> HookRecord<'_> {
        HookRecord {
            level,
            message: "message",
            fields,
        }
    }

    #[test]
    fn test_hook_registered_per_level() {
        let hook = Arc::new(CountingHook {
            levels: vec![NativeLevel::Error, NativeLevel::Warn],
            fired: AtomicUsize::new(0),
        });
        let mut hooks = LevelHooks::new();
        hooks.add(hook.clone());

        let fields = Fields::new();
        hooks.fire(&record(NativeLevel::Error, &fields)).unwrap();
        hooks.fire(&record(NativeLevel::Warn, &fields)).unwrap();
        hooks.fire(&record(NativeLevel::Info, &fields)).unwrap();

        assert_eq!(hook.fired.load(Ordering::SeqCst), 2);
        assert_eq!(hooks.for_level(NativeLevel::Info).len(), 0);
    }

    #[test]
    fn test_fire_stops_at_first_error() {
        let counting = Arc::new(CountingHook {
            levels: vec![NativeLevel::Error],
            fired: AtomicUsize::new(0),
        });
        let mut hooks = LevelHooks::new();
        hooks.add(Arc::new(FailingHook));
        hooks.add(counting.clone());

        let fields = Fields::new();
        let err = hooks.fire(&record(NativeLevel::Error, &fields)).unwrap_err();

        assert_eq!(err.to_string(), "sink unavailable");
        assert_eq!(counting.fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty() {
        assert!(LevelHooks::new().is_empty());
        let mut hooks = LevelHooks::new();
        hooks.add(Arc::new(FailingHook));
        assert!(!hooks.is_empty());
        assert_eq!(format!("{:?}", hooks), "{Error: 1}");
    }
}
