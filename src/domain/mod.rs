//! Domain layer
//! 터미널 규칙(라인/테마/볼륨 렌더링/명령 해석)을 I/O 없이 표현한다.

pub mod command;
pub mod favorites;
pub mod line;
pub mod texts;
pub mod theme;
pub mod volume;
