use teloxide::{prelude::*, types::ParseMode};

use crate::app_context::AppContext;
use crate::sampler::{DiskInfo, MemoryInfo, ResourceSampler};

use super::super::helpers::as_html_block;

const SAMPLING_ERROR: &str = "An error occurred while retrieving resource usage.";

pub(crate) async fn handle_cpu(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let sampled = {
        let mut sampler = app_context.sampler.lock().await;
        sampler.cpu_percent()
    };
    let message = match sampled {
        Ok(percent) => as_html_block("CPU Information", &cpu_body(percent)),
        Err(error) => {
            log::error!("cpu sampling failed: {}", error);
            as_html_block("CPU Information", SAMPLING_ERROR)
        }
    };
    bot.send_message(msg.chat.id, message)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub(crate) async fn handle_disk(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let sampled = {
        let mut sampler = app_context.sampler.lock().await;
        sampler.disk_info()
    };
    let message = match sampled {
        Ok(disk) => as_html_block("Disk Space", &disk_body(&disk)),
        Err(error) => {
            log::error!("disk sampling failed: {}", error);
            as_html_block("Disk Space", SAMPLING_ERROR)
        }
    };
    bot.send_message(msg.chat.id, message)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub(crate) async fn handle_ram(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let sampled = {
        let mut sampler = app_context.sampler.lock().await;
        sampler.memory_info()
    };
    let message = match sampled {
        Ok(memory) => as_html_block("RAM Information", &ram_body(&memory)),
        Err(error) => {
            log::error!("memory sampling failed: {}", error);
            as_html_block("RAM Information", SAMPLING_ERROR)
        }
    };
    bot.send_message(msg.chat.id, message)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub(crate) fn cpu_body(percent: f32) -> String {
    format!("CPU usage: {:.1}%", percent)
}

pub(crate) fn disk_body(disk: &DiskInfo) -> String {
    format!(
        "Free: {:.2} GB\nTotal: {:.2} GB\nUsage: {:.1}%",
        disk.free_gb, disk.total_gb, disk.percent_used
    )
}

pub(crate) fn ram_body(memory: &MemoryInfo) -> String {
    format!(
        "Available: {:.2} GB\nTotal: {:.2} GB\nUsage: {:.1}%",
        memory.available_gb, memory.total_gb, memory.percent_used
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_bodies_carry_the_sampled_values() {
        assert_eq!(cpu_body(93.04), "CPU usage: 93.0%");

        let disk = DiskInfo {
            free_gb: 0.5,
            total_gb: 100.0,
            percent_used: 99.5,
        };
        assert_eq!(disk_body(&disk), "Free: 0.50 GB\nTotal: 100.00 GB\nUsage: 99.5%");

        let memory = MemoryInfo {
            available_gb: 1.25,
            total_gb: 16.0,
            percent_used: 92.2,
        };
        assert_eq!(
            ram_body(&memory),
            "Available: 1.25 GB\nTotal: 16.00 GB\nUsage: 92.2%"
        );
    }
}
