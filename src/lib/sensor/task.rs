/*
 * AgriSense, a crop prediction dashboard with simulated field sensors
 * Copyright (C) 2025 AgriSense Developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::time::Duration;

use tokio::{
	sync::oneshot,
	task::JoinHandle,
	time::{self, Instant, MissedTickBehavior},
};

/// A repeating job that first fires one `period` after it starts.
///
/// [`PeriodicTask::stop`] resolves only once the job has exited, so nothing
/// it runs can be observed afterwards. Dropping a running task aborts it.
pub struct PeriodicTask {
	cancel: Option<oneshot::Sender<()>>,
	handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
	/// Must be called from within a tokio runtime.
	pub fn start<F>(period: Duration, mut tick: F) -> Self
	where
		F: FnMut() + Send + 'static,
	{
		let (cancel, mut cancelled) = oneshot::channel::<()>();

		let handle = tokio::spawn(async move {
			let mut interval = time::interval_at(Instant::now() + period, period);
			interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

			loop {
				tokio::select! {
					biased;
					// Resolves on an explicit stop and when the sender is dropped
					_ = &mut cancelled => break,
					_ = interval.tick() => tick(),
				}
			}
		});

		Self {
			cancel: Some(cancel),
			handle: Some(handle),
		}
	}

	pub fn is_finished(&self) -> bool {
		self.handle
			.as_ref()
			.is_none_or(|handle| handle.is_finished())
	}

	pub async fn stop(mut self) {
		if let Some(cancel) = self.cancel.take() {
			let _ = cancel.send(());
		}

		if let Some(handle) = self.handle.take() {
			if let Err(err) = handle.await {
				if err.is_panic() {
					log::error!("periodic task panicked before it was stopped");
				}
			}
		}
	}
}

impl Drop for PeriodicTask {
	fn drop(&mut self) {
		if let Some(handle) = self.handle.take() {
			handle.abort();
		}
	}
}
