//! Simulation statistics collection and reporting.
//!
//! Two counters are kept:
//! 1. **Engine:** micro-steps, retired instructions, faults, traps and input stalls.
//! 2. **Memory:** cache hits and misses by access type, evictions, write buffer drains and stalls.

use std::fmt;
use std::time::Instant;

use crate::common::AccessType;

/// Counters maintained by the memory facade and its controller thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryStats {
    /// Instruction fetches that hit in the cache.
    pub fetch_hits: u64,
    /// Instruction fetches that missed.
    pub fetch_misses: u64,
    /// Data reads that hit.
    pub read_hits: u64,
    /// Data reads that missed.
    pub read_misses: u64,
    /// Stores that found their line present.
    pub write_hits: u64,
    /// Stores that had to fill their line first.
    pub write_misses: u64,
    /// Clean lines replaced to make room.
    pub evictions: u64,
    /// Entries propagated from the write buffer to main memory.
    pub drains: u64,
    /// Stores that waited for write buffer space.
    pub buffer_stalls: u64,
}

impl MemoryStats {
    /// Counts one cache lookup.
    pub const fn record(&mut self, kind: AccessType, hit: bool) {
        let counter = match (kind, hit) {
            (AccessType::Fetch, true) => &mut self.fetch_hits,
            (AccessType::Fetch, false) => &mut self.fetch_misses,
            (AccessType::Read, true) => &mut self.read_hits,
            (AccessType::Read, false) => &mut self.read_misses,
            (AccessType::Write, true) => &mut self.write_hits,
            (AccessType::Write, false) => &mut self.write_misses,
        };
        *counter += 1;
    }

    /// Total lookups of every kind.
    pub const fn accesses(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Total hits.
    pub const fn hits(&self) -> u64 {
        self.fetch_hits + self.read_hits + self.write_hits
    }

    /// Total misses.
    pub const fn misses(&self) -> u64 {
        self.fetch_misses + self.read_misses + self.write_misses
    }
}

const fn miss_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        (misses as f64 / total as f64) * 100.0
    }
}

impl fmt::Display for MemoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MEMORY HIERARCHY")?;
        for (name, hits, misses) in [
            ("fetch", self.fetch_hits, self.fetch_misses),
            ("read", self.read_hits, self.read_misses),
            ("write", self.write_hits, self.write_misses),
        ] {
            writeln!(
                f,
                "  {:<6} accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                name,
                hits + misses,
                hits,
                miss_rate(hits, misses)
            )?;
        }
        writeln!(f, "  cache.evictions        {}", self.evictions)?;
        writeln!(f, "  wbuf.drains            {}", self.drains)?;
        write!(f, "  wbuf.stalls            {}", self.buffer_stalls)
    }
}

/// Execution engine statistics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Micro-steps executed, including fetch and decode steps.
    pub micro_steps: u64,
    /// Instructions that reached completion.
    pub instructions_retired: u64,
    /// Machine faults taken.
    pub faults_taken: u64,
    /// TRAP instructions executed.
    pub traps_taken: u64,
    /// Times execution paused on an empty keyboard queue.
    pub input_waits: u64,
    /// Characters written to the printer.
    pub chars_printed: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            micro_steps: 0,
            instructions_retired: 0,
            faults_taken: 0,
            traps_taken: 0,
            input_waits: 0,
            chars_printed: 0,
        }
    }
}

impl SimStats {
    /// Average micro-steps per retired instruction.
    pub fn steps_per_instruction(&self) -> f64 {
        self.micro_steps as f64 / self.instructions_retired.max(1) as f64
    }

    /// Formats the engine counters together with a memory snapshot.
    pub fn report(&self, memory: &MemoryStats) -> String {
        format!("{self}\n----------------------------------------------------------\n{memory}\n==========================================================")
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        writeln!(f, "==========================================================")?;
        writeln!(f, "SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {seconds:.4} s")?;
        writeln!(f, "sim_micro_steps          {}", self.micro_steps)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_steps_per_inst       {:.4}", self.steps_per_instruction())?;
        writeln!(f, "faults                   {}", self.faults_taken)?;
        writeln!(f, "traps                    {}", self.traps_taken)?;
        writeln!(f, "input_waits              {}", self.input_waits)?;
        write!(f, "chars_printed            {}", self.chars_printed)
    }
}
