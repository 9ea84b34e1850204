//! Background subgraph loading.
//!
//! One load request spawns one worker thread; results come back over a typed
//! channel stamped with a request epoch. A newer request supersedes older
//! in-flight work: stale epochs are simply dropped by the receiver, so the
//! newest request always wins regardless of completion order.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::debug;

use crate::components::FowlId;
use crate::error::Result;
use crate::genealogy::builder::{load_family_subgraph, FamilySubgraph};
use crate::genealogy::generation::assign_generations;
use crate::genealogy::stats::{compute_statistics, Clock, TreeStatistics};
use crate::registry::FowlRegistry;

/// Everything a finished load carries back to the view.
#[derive(Debug, Clone)]
pub struct LoadedTree {
    pub root: FowlId,
    pub subgraph: FamilySubgraph,
    pub generations: HashMap<FowlId, u32>,
    pub statistics: TreeStatistics,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub epoch: u64,
    pub result: Result<LoadedTree>,
}

pub struct TreeLoader {
    registry: Arc<Mutex<FowlRegistry>>,
    clock: Arc<dyn Clock>,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
    epoch: u64,
}

impl TreeLoader {
    pub fn new(registry: Arc<Mutex<FowlRegistry>>, clock: Arc<dyn Clock>) -> Self {
        let (tx, rx) = channel();
        Self {
            registry,
            clock,
            tx,
            rx,
            epoch: 0,
        }
    }

    /// Epoch of the most recent request; completions below it are stale.
    pub fn latest_epoch(&self) -> u64 {
        self.epoch
    }

    /// Kick off a load on a worker thread and return its epoch.
    pub fn request(&mut self, root: FowlId, max_depth: u32) -> u64 {
        self.epoch += 1;
        let epoch = self.epoch;
        let registry = Arc::clone(&self.registry);
        let clock = Arc::clone(&self.clock);
        let tx = self.tx.clone();

        debug!(epoch, root = root.0, "load requested");
        thread::spawn(move || {
            let result = {
                let registry = registry.lock().unwrap();
                load_family_subgraph(&*registry, root, max_depth)
            }
            .map(|subgraph| {
                let generations = assign_generations(&subgraph.nodes);
                let statistics = compute_statistics(&subgraph.nodes, &generations, &*clock);
                LoadedTree {
                    root,
                    subgraph,
                    generations,
                    statistics,
                }
            });
            // Receiver gone means the screen went away; nothing to deliver.
            let _ = tx.send(LoadOutcome { epoch, result });
        });
        epoch
    }

    /// Non-blocking: next completed outcome, if any.
    pub fn try_recv(&self) -> Option<LoadOutcome> {
        self.rx.try_recv().ok()
    }

    #[cfg(test)]
    pub(crate) fn recv_blocking(&self) -> Option<LoadOutcome> {
        self.rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .ok()
    }
}
