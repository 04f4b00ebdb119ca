//! Draws every panel into its computed box.

use ratatui::Frame;

use crate::core::state::DashState;
use crate::ui::layout::DashLayout;
use crate::ui::widgets::{
    ContainerPanel, CpuPanel, DiskPanel, GpuPanel, Header, MemoryPanel, NetworkPanel,
    ProcessPanel, ThermalPanel,
};

pub struct Renderer;

impl Renderer {
    pub fn render(frame: &mut Frame, state: &DashState) {
        let layout = DashLayout::compute(
            frame.area(),
            state.has_gpu(),
            state.has_containers(),
        );

        frame.render_widget(Header::new(state), layout.header);

        if let Some(area) = layout.cpu {
            frame.render_widget(CpuPanel::new(state), area);
        }
        if let Some(area) = layout.memory {
            frame.render_widget(MemoryPanel::new(state), area);
        }
        if let Some(area) = layout.thermal {
            frame.render_widget(ThermalPanel::new(state), area);
        }
        if let Some(area) = layout.gpu {
            frame.render_widget(GpuPanel::new(state), area);
        }
        if let Some(area) = layout.processes {
            frame.render_widget(ProcessPanel::new(state), area);
        }
        if let Some(area) = layout.network {
            frame.render_widget(NetworkPanel::new(state), area);
        }
        if let Some(area) = layout.disk {
            frame.render_widget(DiskPanel::new(state), area);
        }
        if let Some(area) = layout.containers {
            frame.render_widget(ContainerPanel::new(state), area);
        }
    }
}
