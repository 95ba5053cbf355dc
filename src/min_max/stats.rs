pub trait Stats {
    fn record_node(&mut self);
    fn record_terminal(&mut self);
    fn record_cache_hit(&mut self);
    fn record_cache_miss(&mut self);
}

#[derive(Debug, Default)]
pub struct NullStats;

impl Stats for NullStats {
    fn record_node(&mut self) {}
    fn record_terminal(&mut self) {}
    fn record_cache_hit(&mut self) {}
    fn record_cache_miss(&mut self) {}
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct SearchStats {
    pub node_count: u64,
    pub terminal_count: u64,
    pub cache_hit_count: u64,
    pub cache_miss_count: u64,
}

impl Stats for SearchStats {
    fn record_node(&mut self) {
        self.node_count += 1;
    }

    fn record_terminal(&mut self) {
        self.terminal_count += 1;
    }

    fn record_cache_hit(&mut self) {
        self.cache_hit_count += 1;
    }

    fn record_cache_miss(&mut self) {
        self.cache_miss_count += 1;
    }
}
