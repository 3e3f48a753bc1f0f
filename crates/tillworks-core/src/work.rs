//! The stage scheduler: one bounded unit of farm work per call.
//!
//! Each [`FarmController::do_work`] call runs the first applicable phase
//! and returns:
//!
//! 1. **Re-plan** when the rows are empty or the re-plan interval is due.
//! 2. **Produce** waiting for storage blocks everything else.
//! 3. **Fertilizer upkeep** must leave some stock, or the call stops.
//! 4. **Crop queue**: resolve the top crop.
//! 5. **Directions**: in fixed order, collect windfall and run the current
//!    stage against the side's rows. The first side that cultivates or
//!    schedules a harvest ends the sweep.
//!
//! The stage flips at the end of every call, early returns included.

use std::sync::Arc;

use rust_decimal::Decimal;
use tillworks_types::{Direction, FaultCode, ResourceKind, Stage};
use tillworks_world::{FarmWorld, classify_humidity, classify_temperature};
use tracing::debug;

use crate::controller::FarmController;
use crate::inventory::FarmInventory;
use crate::queues::HarvestProvider;
use crate::strategy::{WorkContext, WorkStrategy};

/// Resource and farmland observations from one cultivation sweep.
#[derive(Debug, Clone, Copy, Default)]
struct WorkStatus {
    has_farmland: bool,
    has_fertilizer: bool,
    has_liquid: bool,
}

impl FarmController {
    /// Run one unit of work. Returns whether anything was done.
    pub fn do_work(&mut self, world: &mut dyn FarmWorld, inventory: &mut dyn FarmInventory) -> bool {
        let stage = self.stage;
        let did_work = self.run_stage(world, inventory);
        self.stage = stage.next();
        debug!(?stage, did_work, "Work call finished");
        did_work
    }

    fn run_stage(&mut self, world: &mut dyn FarmWorld, inventory: &mut dyn FarmInventory) -> bool {
        if !self.is_assembled() {
            return false;
        }

        if self.replan_due() {
            self.plan_targets(world);
        }

        if self.queues.has_produce() {
            let delivered = self.queues.drain_produce(inventory);
            self.faults.set_condition(!delivered, FaultCode::NoSpace);
            return delivered;
        }

        let has_fertilizer = self.resources.maintain_fertilizer(inventory);
        if self
            .faults
            .set_condition(!has_fertilizer, FaultCode::NoFertilizer)
        {
            return false;
        }

        let climate = self.climate(world);
        let hydration = self.hydration.modifier(&climate);
        let mut ctx = WorkContext {
            world,
            inventory,
            temperature: classify_temperature(climate.temperature),
            humidity: classify_humidity(climate.humidity),
        };

        if self.queues.has_crops() {
            return self.cull_crop(&mut ctx, hydration);
        }

        let mut status = WorkStatus::default();
        let mut did_work = false;
        let mut collected = false;
        for direction in Direction::ALL {
            let Some(strategy) = self.strategies.get(&direction).cloned() else {
                continue;
            };
            if self.listeners.cancel_task(strategy.as_ref(), direction) {
                debug!(%direction, "Work cancelled by listener");
                continue;
            }

            collected |= self.collect_windfall(&mut ctx, strategy.as_ref());

            let worked = match self.stage {
                Stage::Cultivate => {
                    self.cultivate_targets(&mut ctx, direction, strategy.as_ref(), hydration, &mut status)
                }
                Stage::Harvest => self.harvest_targets(&mut ctx, direction, &strategy),
            };
            if worked {
                did_work = true;
                break;
            }
        }

        if self.stage == Stage::Cultivate {
            self.faults
                .set_condition(!status.has_farmland, FaultCode::NoFarmland);
            self.faults
                .set_condition(!status.has_fertilizer, FaultCode::NoFertilizer);
            self.faults
                .set_condition(!status.has_liquid, FaultCode::NoLiquid);
        }

        did_work || collected
    }

    /// Resolve the crop on top of the queue. Returns whether it left the queue.
    fn cull_crop(&mut self, ctx: &mut WorkContext<'_>, hydration: Decimal) -> bool {
        let Some(crop) = self.queues.peek_crop() else {
            return false;
        };
        if self.listeners.before_crop_harvest(crop) {
            debug!(cell = %crop.descriptor().cell, "Crop harvest vetoed by listener");
            self.queues.pop_crop();
            return true;
        }

        let (fertilizer, liquid) = self.queues.provider().map_or((0, 0), |provider| {
            (
                provider.strategy.fertilizer_consumption(),
                provider.strategy.liquid_consumption(hydration),
            )
        });

        let has_fertilizer = self.resources.can_afford(ResourceKind::Fertilizer, fertilizer);
        if self
            .faults
            .set_condition(!has_fertilizer, FaultCode::NoFertilizer)
        {
            return false;
        }
        let has_liquid = self.resources.can_afford(ResourceKind::Liquid, liquid);
        if self.faults.set_condition(!has_liquid, FaultCode::NoLiquid) {
            return false;
        }

        let Some(crop) = self.queues.pop_crop() else {
            return false;
        };
        let descriptor = crop.descriptor();
        let harvest = match crop.harvest(ctx) {
            Some(items) if !items.is_empty() => items,
            _ => {
                debug!(cell = %descriptor.cell, species = %descriptor.species, "Crop yielded nothing");
                return true;
            }
        };

        self.resources.debit(ResourceKind::Fertilizer, fertilizer);
        self.resources.debit(ResourceKind::Liquid, liquid);
        self.listeners.after_crop_harvest(&harvest, &descriptor);

        for leftover in ctx.inventory.stow_harvest(harvest) {
            self.queues.push_produce(leftover);
        }
        true
    }

    /// Pick up windfall for `strategy`. Never resource-gated.
    fn collect_windfall(&mut self, ctx: &mut WorkContext<'_>, strategy: &dyn WorkStrategy) -> bool {
        let mut items = strategy.collect(ctx);
        items.retain(|item| !item.is_empty());
        if items.is_empty() {
            return false;
        }

        self.listeners.has_collected(&items, strategy);
        for item in items {
            if let Some(rest) = ctx.inventory.add_produce(item) {
                self.queues.push_produce(rest);
            }
        }
        true
    }

    fn cultivate_targets(
        &mut self,
        ctx: &mut WorkContext<'_>,
        direction: Direction,
        strategy: &dyn WorkStrategy,
        hydration: Decimal,
        status: &mut WorkStatus,
    ) -> bool {
        let Some(rows) = self.targets.get(&direction).cloned() else {
            return false;
        };
        let fertilizer = strategy.fertilizer_consumption();
        let liquid = strategy.liquid_consumption(hydration);

        let mut worked = false;
        for target in rows {
            if target.extent == 0 {
                break;
            }
            status.has_farmland = true;

            if !self.resources.can_afford(ResourceKind::Fertilizer, fertilizer)
                || !self.resources.can_afford(ResourceKind::Liquid, liquid)
            {
                continue;
            }

            let cell = target.work_cell();
            if strategy.cultivate(ctx, cell, target.direction, target.extent) {
                self.resources.debit(ResourceKind::Fertilizer, fertilizer);
                self.resources.debit(ResourceKind::Liquid, liquid);
                self.listeners
                    .has_cultivated(strategy, cell, target.direction, target.extent);
                worked = true;
            }
        }

        status.has_liquid = self.resources.can_afford(ResourceKind::Liquid, liquid);
        status.has_fertilizer = self.resources.can_afford(ResourceKind::Fertilizer, fertilizer);
        worked
    }

    fn harvest_targets(
        &mut self,
        ctx: &mut WorkContext<'_>,
        direction: Direction,
        strategy: &Arc<dyn WorkStrategy>,
    ) -> bool {
        let Some(rows) = self.targets.get(&direction).cloned() else {
            return false;
        };
        for target in rows {
            let cell = target.work_cell();
            let crops = strategy.harvest(ctx, cell, target.direction, target.extent);
            if crops.is_empty() {
                continue;
            }

            debug!(%direction, count = crops.len(), "Scheduled crops for harvest");
            self.listeners.has_scheduled_harvest(
                &crops,
                strategy.as_ref(),
                cell,
                target.direction,
                target.extent,
            );
            self.queues.push_crops(
                crops,
                HarvestProvider {
                    direction,
                    strategy: Arc::clone(strategy),
                },
            );
            return true;
        }
        false
    }
}
