/*!

This is the long-form manual for `profile_match` and `matrixprofile`.

## The input template

The sheet is read by position only. The text of the header row is used for
the competency names and nothing else, so renaming a column has no effect
while moving one breaks the extraction.

Rows (0-based):

| Row | Content |
|-----|---------|
| 0   | header: the competency names |
| 1   | reference: the ideal competency scores (and, for the `reference-row` layout, the ideal behavioral and aptitude scores) |
| 2.. | one row per person |

Columns of a person row (0-based, `A` is 0):

| Columns  | Content |
|----------|---------|
| 1        | name of the person. Rows with an empty name are skipped. |
| 8 - 11   | behavioral (DISC) scores: D, I, S, C |
| 12 - 16  | aptitude scores: Verbal, Spatial, Logical, Numerical, Abstract |
| 20       | behavioral match percentage, optional |
| 21       | aptitude match percentage, optional |
| 24 - 30  | competency scores (24 - 29 with six competencies) |
| 31 - 34  | ideal behavioral scores |
| 36 - 40  | ideal aptitude scores |

At least three rows are required, and at least one person row must have a
name.

### Cell values

Numbers may be written with `.` or `,` as the decimal separator and may be
surrounded by text (`"80,5 %"` is read as `80.5`). Only the first number of
a cell is read. Empty cells and cells without any number are read as `0`:
a dirty cell never stops the processing of the sheet.

A competency with an empty header cell is named `Comp <n>`, counting from 1.
Every profile has exactly as many competencies as the layout has columns:
a sheet that only names two competencies still yields six or seven, the
others named `Comp <n>` with their scores read as `0`.

### Layouts

Exports have come in a few shapes. The layout is chosen before reading the
sheet:

* `per-person` (default): each person row carries the ideal behavioral and
  aptitude scores at columns 31 - 34 and 36 - 40.
* `reference-row`: the ideal behavioral and aptitude scores are read once
  from the reference row, at the same columns, and shared by every person.

Independently, the competency block is 7 columns wide by default, or 6.

## Match percentage

For each axis, a person gets full credit when the ideal is `0` or when the
score reaches the ideal; otherwise the credit is `score / ideal`. The match
is the average credit, as a percentage. Exceeding the ideal is not
penalized.

| Match       | Tier      |
|-------------|-----------|
| 80 and more | `good`    |
| 60 to 80    | `warning` |
| below 60    | `bad`     |

The behavioral and aptitude matches written in the sheet (columns 20 and
21) take precedence over the computed ones. A missing or zero value in the
sheet falls back to the computed match, and so does a value outside
`0 - 100` (`150 %` or `-5`). Competency matches are always computed.

## Configuration

`matrixprofile` accepts a JSON configuration file with the `--config` flag:

```json
{
  "inputFile": "results.csv",
  "inputType": "csv",
  "worksheetName": null,
  "idealSource": "per-person",
  "competencyColumns": 7,
  "outputFile": "summary.json",
  "singleProfile": false
}
```

All the fields are optional. `inputFile` is relative to the directory of the
configuration file. The command line flags take precedence over the
configuration file.

CSV inputs use `;` as the delimiter. Files that are not valid UTF-8 are read
as Latin-1.

*/
