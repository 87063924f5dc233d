use regex::Regex;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// 检查 PID 对应的进程当前是否存在
pub fn process_exists(pid: u32) -> bool {
    let target = Pid::from_u32(pid);
    let mut sys = System::new_all();
    sys.refresh_processes(ProcessesToUpdate::Some(&[target]), true);
    sys.process(target).is_some()
}

/// 按命令行模式解析目标进程 PID
///
/// 模式优先按正则匹配进程命令行，正则非法时退化为
/// 命令行/进程名的子串匹配。多个进程命中时返回主进程。
pub fn resolve_target_pid(pattern: &str) -> Option<u32> {
    let mut sys = System::new_all();
    sys.refresh_processes(ProcessesToUpdate::All, true);

    let regex = Regex::new(pattern).ok();
    if regex.is_none() {
        log::debug!("'{}' is not a valid regex, falling back to substring match", pattern);
    }

    // 跳过自身，模式就在记录器自己的命令行里
    let own_pid = std::process::id();

    let mut matches = Vec::new();
    for (pid, process) in sys.processes() {
        if pid.as_u32() == own_pid {
            continue;
        }

        let cmdline = process
            .cmd()
            .iter()
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");

        let hit = match &regex {
            Some(re) => re.is_match(&cmdline),
            None => {
                cmdline.contains(pattern) || process.name().to_string_lossy().contains(pattern)
            }
        };

        if hit {
            matches.push((pid.as_u32(), process.parent().map(|p| p.as_u32())));
        }
    }

    select_main_pid(&matches)
}

/// 多个候选时挑选主进程
///
/// 策略优先级：
/// 1. PPID = 1 的进程（systemd 直接启动）
/// 2. 父进程不在候选列表中的进程（父进程，非子线程）
/// 3. 最小 PID（通常是最早创建的主进程）
fn select_main_pid(matches: &[(u32, Option<u32>)]) -> Option<u32> {
    if matches.len() <= 1 {
        return matches.first().map(|(pid, _)| *pid);
    }

    for (pid, ppid) in matches {
        if *ppid == Some(1) {
            log::debug!("Found main process (PPID=1): PID {}", pid);
            return Some(*pid);
        }
    }

    let candidate_pids: Vec<u32> = matches.iter().map(|(pid, _)| *pid).collect();
    for (pid, ppid) in matches {
        if let Some(parent) = ppid {
            if !candidate_pids.contains(parent) {
                log::debug!("Found main process (parent not in group): PID {} (PPID={})", pid, parent);
                return Some(*pid);
            }
        }
    }

    let min_pid = candidate_pids.iter().min().copied();
    log::debug!(
        "Found main process (min PID fallback) from {} matches: {:?}",
        matches.len(),
        min_pid
    );
    min_pid
}
