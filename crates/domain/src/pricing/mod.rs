//! # 计价引擎
//!
//! 纯函数实现，不做任何IO，也不读取全局状态。调用方传入费率快照和成员快照，
//! 每次输入变化都重新计算（表单实时估价、提交时最终计价）。
//!
//! 计算流程:
//! 1. 按邮箱找到成员，请假期内直接返回 0 ([`leave`])
//! 2. 解析费率，缺失字段使用默认值 ([`rates`])
//! 3. 规范化角色并选择费率档位 ([`engine`])
//! 4. 按大小查找档位单价 ([`bands`])
//! 5. 乘以实习系数后四舍五入
//!
//! 引擎从不报错，所有无法解析的输入都退化为默认值或 0。

pub mod bands;
pub mod engine;
pub mod leave;
pub mod rates;

pub use bands::{band_rate, round_half_up, Band, OPEN_BAND_LIMIT};
pub use engine::{calculate_price, calculate_price_on, price_for_role, quote, PriceQuote};
pub use leave::{find_worker, is_zero_rated};
pub use rates::{resolve_rates, RateSchedule, ResolvedRates};
