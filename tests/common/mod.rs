//! Shared scripted solver for controller and orchestrator tests
#![allow(dead_code)]

use infinitile::AlgorithmError;
use infinitile::algorithm::solver::{RunOutcome, SolverFactory, SolverHandle};
use infinitile::io::error::{Result, invalid_parameter};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// How scripted handles react to a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Behaviour {
    /// Contradict whenever the handle carries seeds
    pub contradict_seeded: bool,
    /// Contradict on every run
    pub contradict_always: bool,
    /// Contradict on the first resumed run of a seeded handle
    pub contradict_seeded_on_resume: bool,
}

/// Everything the scripted handles did, shared with the test
#[derive(Debug, Default)]
pub struct SolverLog {
    /// (width, height) of every handle created
    pub created: Vec<(usize, usize)>,
    /// Seeds applied per handle, in creation order
    pub seeds: Vec<usize>,
    /// Total run calls across handles
    pub runs: usize,
}

/// Factory for handles that fill cells in scan order
///
/// Unseeded cells get a value derived from their local position and the run
/// seed, so a shifted window only keeps world-aligned values if seeds were
/// carried across.
///
/// Clones share their log and behaviour, so a test can keep one clone and
/// steer handles created by the clone it handed away.
#[derive(Debug, Clone)]
pub struct ScriptedFactory {
    pub tiles: usize,
    behaviour: Rc<Cell<Behaviour>>,
    pub log: Rc<RefCell<SolverLog>>,
}

impl ScriptedFactory {
    pub fn new(tiles: usize) -> Self {
        Self {
            tiles,
            behaviour: Rc::new(Cell::new(Behaviour::default())),
            log: Rc::new(RefCell::new(SolverLog::default())),
        }
    }

    pub fn with_behaviour(self, behaviour: Behaviour) -> Self {
        self.behaviour.set(behaviour);
        self
    }

    /// Change how handles created from now on behave
    pub fn set_behaviour(&self, behaviour: Behaviour) {
        self.behaviour.set(behaviour);
    }

    pub fn seeds_of_last(&self) -> usize {
        self.log.borrow().seeds.last().copied().unwrap_or(0)
    }

    pub fn created(&self) -> usize {
        self.log.borrow().created.len()
    }

    pub fn runs(&self) -> usize {
        self.log.borrow().runs
    }
}

impl SolverFactory for ScriptedFactory {
    type Handle = ScriptedHandle;

    fn create(&self, width: usize, height: usize) -> Result<Self::Handle> {
        self.log.borrow_mut().created.push((width, height));
        self.log.borrow_mut().seeds.push(0);
        Ok(ScriptedHandle {
            width,
            height,
            tiles: self.tiles,
            behaviour: self.behaviour.get(),
            log: Rc::clone(&self.log),
            seeds: Vec::new(),
            cells: vec![None; width * height],
            cursor: 0,
            runs: 0,
            dead: false,
        })
    }
}

/// Scan-order handle produced by `ScriptedFactory`
#[derive(Debug)]
pub struct ScriptedHandle {
    width: usize,
    height: usize,
    tiles: usize,
    behaviour: Behaviour,
    log: Rc<RefCell<SolverLog>>,
    seeds: Vec<(usize, usize)>,
    cells: Vec<Option<usize>>,
    cursor: usize,
    runs: usize,
    dead: bool,
}

impl ScriptedHandle {
    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(AlgorithmError::SampleOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x + y * self.width)
    }

    /// Value an unseeded cell receives
    pub fn fill_value(x: usize, y: usize, seed: u64, tiles: usize) -> usize {
        (x * 7 + y * 13 + seed as usize) % tiles
    }
}

impl SolverHandle for ScriptedHandle {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn constrain(&mut self, x: usize, y: usize, tile: usize) -> Result<()> {
        let index = self.index(x, y)?;
        if self.runs > 0 {
            return Err(invalid_parameter("constrain", &index, &"handle already ran"));
        }
        if tile >= self.tiles {
            return Err(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: self.tiles,
            });
        }
        self.seeds.push((index, tile));
        if let Some(count) = self.log.borrow_mut().seeds.last_mut() {
            *count += 1;
        }
        Ok(())
    }

    fn run(&mut self, seed: u64, iteration_budget: usize) -> RunOutcome {
        self.runs += 1;
        self.log.borrow_mut().runs += 1;
        if self.dead {
            return RunOutcome::Contradiction;
        }
        let seeded = !self.seeds.is_empty();
        if self.behaviour.contradict_always
            || (self.behaviour.contradict_seeded && seeded)
            || (self.behaviour.contradict_seeded_on_resume && seeded && self.runs > 1)
        {
            self.dead = true;
            return RunOutcome::Contradiction;
        }

        if self.runs == 1 {
            for &(index, tile) in &self.seeds {
                if let Some(cell) = self.cells.get_mut(index) {
                    *cell = Some(tile);
                }
            }
        }

        let mut filled = 0;
        while self.cursor < self.cells.len() {
            let (x, y) = (self.cursor % self.width, self.cursor / self.width);
            let tiles = self.tiles;
            if let Some(cell) = self.cells.get_mut(self.cursor) {
                if cell.is_none() {
                    if iteration_budget > 0 && filled == iteration_budget {
                        return RunOutcome::Incomplete;
                    }
                    *cell = Some(Self::fill_value(x, y, seed, tiles));
                    filled += 1;
                }
            }
            self.cursor += 1;
        }
        RunOutcome::Resolved
    }

    fn sample(&self, x: usize, y: usize) -> Result<Option<usize>> {
        let index = self.index(x, y)?;
        Ok(self.cells.get(index).copied().flatten())
    }
}
